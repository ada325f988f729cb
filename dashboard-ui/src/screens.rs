pub mod academies;
pub mod attendance;
pub mod courses;
pub mod messaging;
pub mod notifications;
pub mod overview;
pub mod payments;
pub mod players;
pub mod programs;
pub mod session_plans;
pub mod settings;

pub use academies::AcademiesScreen;
pub use attendance::AttendanceScreen;
pub use courses::CoursesScreen;
pub use messaging::MessagingScreen;
pub use notifications::NotificationsScreen;
pub use overview::OverviewScreen;
pub use payments::PaymentsScreen;
pub use players::PlayersScreen;
pub use programs::ProgramsScreen;
pub use session_plans::SessionPlansScreen;
pub use settings::SettingsScreen;
