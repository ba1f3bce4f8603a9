use rand::Rng;

use super::SurveyOption;

/// The available vote-distribution strategies.
///
/// A closed set rather than an open trait: the strategy is selected per
/// calculation and no external implementations exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum VoteDistribution {
    /// Every respondent votes for a uniformly random option.
    Random,
    /// Every option receives exactly its preferred number of votes.
    Fixed,
    /// A single random option receives every vote.
    OneSided,
}

impl VoteDistribution {
    /// Pick the strategy for a regular outcome calculation: any rigged
    /// option forces the fixed distribution.
    pub(super) fn select(options: &[SurveyOption]) -> Self {
        if options.iter().any(SurveyOption::is_rigged) {
            Self::Fixed
        } else {
            Self::Random
        }
    }

    /// Distribute votes across `options`, one vote at a time.
    ///
    /// `options` must be non-empty; the owning survey enforces this before
    /// dispatching.
    pub(super) fn distribute(
        self,
        number_of_respondents: u32,
        options: &mut [SurveyOption],
        rng: &mut impl Rng,
    ) {
        match self {
            Self::Random => {
                for _ in 0..number_of_respondents {
                    let index = rng.gen_range(0..options.len());
                    options[index].add_vote();
                }
            }
            Self::Fixed => {
                // Any remainder of the respondent budget below the preferred
                // totals is left unassigned.
                for option in options.iter_mut() {
                    for _ in 0..option.preferred_number_of_votes() {
                        option.add_vote();
                    }
                }
            }
            Self::OneSided => {
                let index = rng.gen_range(0..options.len());
                for _ in 0..number_of_respondents {
                    options[index].add_vote();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::model::common::NonEmptyString;

    use super::*;

    fn options(specs: &[(&str, u32)]) -> Vec<SurveyOption> {
        specs
            .iter()
            .map(|(t, p)| SurveyOption::with_preference(NonEmptyString::new(*t).unwrap(), *p))
            .collect()
    }

    fn total_votes(options: &[SurveyOption]) -> u32 {
        options.iter().map(SurveyOption::number_of_votes).sum()
    }

    #[test]
    fn selects_fixed_when_any_option_is_rigged() {
        let plain = options(&[("Yes", 0), ("No", 0)]);
        assert_eq!(VoteDistribution::select(&plain), VoteDistribution::Random);

        let rigged = options(&[("Yes", 0), ("No", 5)]);
        assert_eq!(VoteDistribution::select(&rigged), VoteDistribution::Fixed);
    }

    #[test]
    fn random_consumes_the_whole_budget() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut options = options(&[("Very awesome", 0), ("Not so much", 0)]);
        VoteDistribution::Random.distribute(350, &mut options, &mut rng);
        assert_eq!(total_votes(&options), 350);
    }

    #[test]
    fn fixed_matches_preferences_exactly() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut options = options(&[("Tabs", 600), ("Spaces", 400)]);
        VoteDistribution::Fixed.distribute(1000, &mut options, &mut rng);
        assert_eq!(options[0].number_of_votes(), 600);
        assert_eq!(options[1].number_of_votes(), 400);
    }

    #[test]
    fn fixed_leaves_remainder_unassigned() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut options = options(&[("Tabs", 100), ("Spaces", 50), ("Neither", 0)]);
        VoteDistribution::Fixed.distribute(350, &mut options, &mut rng);
        assert_eq!(options[0].number_of_votes(), 100);
        assert_eq!(options[1].number_of_votes(), 50);
        assert_eq!(options[2].number_of_votes(), 0);
        // The 200 leftover votes are never assigned.
        assert_eq!(total_votes(&options), 150);
    }

    #[test]
    fn one_sided_gives_everything_to_a_single_option() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut options = options(&[("Red", 0), ("Green", 0), ("Blue", 0)]);
        VoteDistribution::OneSided.distribute(500, &mut options, &mut rng);

        let winners: Vec<_> = options
            .iter()
            .filter(|option| option.number_of_votes() > 0)
            .collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].number_of_votes(), 500);
    }
}
