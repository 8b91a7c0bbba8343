//! Shared email content templates
//!
//! Canonical plain-text content generators for the account flows, used by
//! both production (SES) and mock email services.

/// Generate the body for a registration confirmation email.
pub fn confirmation_text(site: &str, confirm_url: &str) -> String {
    format!(
        "Hi there!\n\n\
        Thanks for signing up at {}.\n\n\
        Click the link below to confirm your email address and activate\n\
        your account:\n\
        {}\n\n\
        The link is valid for 3 days. If you didn't create an account,\n\
        you can safely ignore this email.\n\n\
        Thanks,\n\
        The {} Team",
        site, confirm_url, site
    )
}

/// Generate the body for a forgot-password email.
pub fn password_reset_text(site: &str, reset_url: &str) -> String {
    format!(
        "Hi there!\n\n\
        We received a request to reset your {} password.\n\n\
        Click the link below and we'll email you a new password:\n\
        {}\n\n\
        The link is valid for 3 days. If you didn't request a reset,\n\
        you can safely ignore this email.\n\n\
        Thanks,\n\
        The {} Team",
        site, reset_url, site
    )
}

/// Generate the body delivering a freshly generated password.
pub fn new_password_text(new_password: &str) -> String {
    format!("New password is {}", new_password)
}

/// Generate the body for a team invite email.
pub fn team_invite_text(site: &str, inviter_name: &str, team_name: &str, register_url: &str) -> String {
    format!(
        "Hi there!\n\n\
        {} has invited you to join the team '{}' on {}.\n\n\
        Register with the link below to join:\n\
        {}\n\n\
        Thanks,\n\
        The {} Team",
        inviter_name, team_name, site, register_url, site
    )
}
