use rocket::{
    fairing::{Fairing, Info, Kind},
    tokio::{
        self,
        sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
        sync::Mutex,
    },
    Build, Orbit, Rocket,
};

use crate::model::{db::Survey, mongodb::Id};

/// Domain events raised by the application.
///
/// Events are plain values: the command handler that causes one passes it
/// explicitly to [`EventDispatcher::dispatch`], and the background consumer
/// performs the side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveyEvent {
    /// A survey was created and persisted.
    Created {
        survey_id: Id,
        owner_id: Id,
        topic: String,
    },
}

impl SurveyEvent {
    /// The created-event for the given survey.
    pub fn created(survey: &Survey) -> Self {
        Self::Created {
            survey_id: survey.id,
            owner_id: survey.owner_id,
            topic: survey.topic().to_string(),
        }
    }
}

/// Hands domain events to the background consumer.
pub struct EventDispatcher(UnboundedSender<SurveyEvent>);

impl EventDispatcher {
    fn new() -> (Self, UnboundedReceiver<SurveyEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self(sender), receiver)
    }

    /// Dispatch an event. Delivery is best-effort and in-process: once the
    /// consumer is gone (shutdown), events are dropped.
    pub fn dispatch(&self, event: SurveyEvent) {
        if self.0.send(event).is_err() {
            warn!("Event consumer is gone, dropping event");
        }
    }
}

/// Holds the receiving end of the channel between ignition and liftoff.
struct EventReceiver(Mutex<Option<UnboundedReceiver<SurveyEvent>>>);

/// A fairing that sets up the event channel and spawns the notification
/// consumer once the server is live.
pub struct EventsFairing;

#[rocket::async_trait]
impl Fairing for EventsFairing {
    fn info(&self) -> Info {
        Info {
            name: "Events",
            kind: Kind::Ignite | Kind::Liftoff,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        let (dispatcher, receiver) = EventDispatcher::new();
        Ok(rocket
            .manage(dispatcher)
            .manage(EventReceiver(Mutex::new(Some(receiver)))))
    }

    async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
        let receiver = rocket
            .state::<EventReceiver>()
            .expect("Events fairing did not ignite")
            .0
            .lock()
            .await
            .take();
        if let Some(mut receiver) = receiver {
            tokio::spawn(async move {
                while let Some(event) = receiver.recv().await {
                    match event {
                        SurveyEvent::Created {
                            survey_id,
                            owner_id,
                            topic,
                        } => {
                            info!(
                                "Sending survey-created notification for survey {survey_id} \
                                 (owner {owner_id}): \"{topic}\""
                            );
                        }
                    }
                }
            });
        }
    }
}
