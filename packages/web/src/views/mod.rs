mod auth;
mod create;
mod hero;
mod home;
mod note_detail;
mod settings;

pub use auth::Auth;
pub use create::CreateNote;
pub use hero::Hero;
pub use home::Home;
pub use note_detail::NoteDetail;
pub use settings::Settings;
