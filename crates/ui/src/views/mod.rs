mod activity;
mod audio_player;
mod home;
mod recorder;
mod scripts;
mod state;
mod week;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use week::WeekView;
