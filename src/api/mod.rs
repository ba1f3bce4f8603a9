use rocket::Route;

mod surveys;
mod users;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(users::routes());
    routes.extend(surveys::routes());
    routes
}
