pub mod caller;
pub mod current_user;
pub mod validated_json;

pub use current_user::CurrentUser;
pub use validated_json::ValidatedJson;

use actix_web::{web, HttpRequest};

use crate::error::AppError;
use crate::state::app_state::AppState;

pub(crate) fn app_state(req: &HttpRequest) -> Result<&web::Data<AppState>, AppError> {
    req.app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))
}
