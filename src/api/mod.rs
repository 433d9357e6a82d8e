mod handlers;
mod routes;
mod state;

pub use handlers::{HealthResponse, MoviesResponse, PostersResponse, RecommendResponse};
pub use routes::create_router;
pub use state::{AppState, RecommendationLimits};
