mod chat;
mod dashboard;

pub use chat::{is_exit_command, ChatAgent, EXIT_COMMANDS};
pub use dashboard::{
    build_overview, DashboardAgent, DashboardChatReply, DashboardError, DashboardOverview,
    DashboardReply, ReplyKind, DASHBOARD_GREETING, DASHBOARD_HELP,
};
