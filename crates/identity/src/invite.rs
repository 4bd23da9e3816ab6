//! Invitation links.
//!
//! `{origin}/invite/{dashboardId}?email={encoded}` - a string the agent
//! sends to the client; the invite page reads the dashboard id from the
//! path and pre-fills the email from the query.

use hometrack_core::DashboardId;
use url::Url;

/// Build an invitation link on the given origin.
pub fn invitation_link(
    origin: &str,
    dashboard_id: DashboardId,
    client_email: Option<&str>,
) -> Result<String, url::ParseError> {
    let mut link = Url::parse(origin)?;
    link.set_path(&format!("invite/{dashboard_id}"));
    if let Some(email) = client_email.filter(|e| !e.is_empty()) {
        link.query_pairs_mut().append_pair("email", email);
    }
    Ok(link.to_string())
}
