//! Shared application state injected into every handler.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{AboutService, AuthService, ShorteningService};
use crate::domain::click_event::ClickEvent;
use crate::infrastructure::auth::JwtAuthenticator;
use crate::infrastructure::persistence::{
    PgAboutRepository, PgMappingRepository, PgUserRepository,
};
use crate::utils::code_generator::RandomCodeGenerator;

pub type Shortener = ShorteningService<PgMappingRepository, RandomCodeGenerator>;
pub type Auth = AuthService<PgUserRepository, JwtAuthenticator>;
pub type About = AboutService<PgAboutRepository>;

#[derive(Clone)]
pub struct AppState {
    pub shortening_service: Arc<Shortener>,
    pub auth_service: Arc<Auth>,
    pub about_service: Arc<About>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    /// Report forbidden deletes as 404 instead of 403.
    pub conflate_delete_denial: bool,
}
