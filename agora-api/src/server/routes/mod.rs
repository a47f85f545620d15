use crate::server::ServerRouter;

mod threads;
mod users;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .merge(threads::routes())
        .merge(users::routes())
}
