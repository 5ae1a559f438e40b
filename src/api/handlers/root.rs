use crate::APP_USER_AGENT;

pub async fn root() -> &'static str {
    APP_USER_AGENT
}
