//! Session commands.
//!
//! # Usage
//!
//! ```bash
//! wp-cli signup -n "Jane Doe" -e jane@example.com -p secret
//! wp-cli login -e jane@example.com -p secret
//! wp-cli whoami --refresh
//! wp-cli logout
//! ```

use secrecy::SecretString;
use workpro_core::Email;

use super::{CliError, Context, action_failed};

/// Sign in with email and password.
pub async fn login(ctx: &Context, email: &str, password: &SecretString) -> Result<(), CliError> {
    let email = Email::parse(email)?;
    let profile = ctx
        .client
        .login(&email, password)
        .await
        .map_err(action_failed("Login failed"))?;

    tracing::info!("Signed in as {} <{}>", profile.name, profile.email);
    announce_landing(ctx);
    Ok(())
}

/// Create an account and sign in.
pub async fn signup(
    ctx: &Context,
    name: &str,
    email: &str,
    password: &SecretString,
) -> Result<(), CliError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidArgument("name cannot be empty".to_owned()));
    }
    let email = Email::parse(email)?;

    let profile = ctx
        .client
        .signup(name, &email, password)
        .await
        .map_err(action_failed("Signup failed"))?;

    tracing::info!("Account created for {}", profile.email);
    announce_landing(ctx);
    Ok(())
}

/// Forget the stored session.
pub fn logout(ctx: &Context) -> Result<(), CliError> {
    ctx.client.logout()?;
    Ok(())
}

/// Show the session as stored, optionally refreshing the profile first.
pub async fn whoami(ctx: &Context, refresh: bool) -> Result<(), CliError> {
    if refresh && let Err(e) = ctx.client.me().await {
        tracing::warn!("Could not refresh profile: {}", e.user_message("request failed"));
    }

    let Some(profile) = ctx.session().user_profile()? else {
        tracing::info!("Not signed in");
        return Ok(());
    };

    tracing::info!("{} <{}> ({})", profile.name, profile.email, profile.id);
    if let Some(pic) = &profile.profile_pic {
        tracing::info!("Picture: {pic}");
    }

    match ctx.require_company() {
        Ok(company) => match company.role {
            Some(role) => tracing::info!("Company: {} as {role}", company.id),
            None => tracing::info!("Company: {} (role unknown)", company.id),
        },
        Err(CliError::NoCompany) => tracing::info!("No company selected"),
        Err(e) => return Err(e),
    }

    if ctx.session().is_super_admin(ctx.config.super_admin_email.as_ref()) {
        tracing::info!("Super-admin console available: wp-cli admin console");
    }
    Ok(())
}

/// Where the user lands after signing in.
fn announce_landing(ctx: &Context) {
    if ctx.session().is_super_admin(ctx.config.super_admin_email.as_ref()) {
        tracing::info!("Next: wp-cli admin console");
        return;
    }
    match ctx.require_company() {
        Ok(company) => tracing::info!("Working in company {}", company.id),
        Err(_) => tracing::info!("Next: wp-cli company list, then wp-cli company select <id>"),
    }
}
