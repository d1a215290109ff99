use clap::Args;
use waybill::navigation::{Screen, screens_for};
use waybill_app::context::AppContext;
use zeroize::Zeroizing;

use super::{failure, signed_in};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Login name
    #[arg(long)]
    login: Option<String>,

    /// Password
    #[arg(long, env = "WAYBILL_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

pub(crate) async fn login(ctx: &AppContext, args: LoginArgs) -> Result<(), String> {
    let current = ctx
        .sessions
        .load()
        .await
        .map_err(|error| failure(&error, "failed to read the session".to_string()))?;

    if let Some(session) =
        current.filter(|session| !Screen::Login.is_visible_to(Some(session.role())))
    {
        return Err(format!(
            "already signed in as {}; run `waybill logout` first",
            session.profile.login
        ));
    }

    let session = ctx
        .auth
        .login(
            args.login.unwrap_or_default(),
            Zeroizing::new(args.password.unwrap_or_default()),
        )
        .await
        .map_err(|error| failure(&error, error.user_message()))?;

    println!("signed in as {} ({})", session.profile.full_name(), session.role());

    Ok(())
}

pub(crate) async fn logout(ctx: &AppContext) -> Result<(), String> {
    ctx.auth
        .logout()
        .await
        .map_err(|error| failure(&error, error.user_message()))?;

    println!("signed out");

    Ok(())
}

pub(crate) async fn profile(ctx: &AppContext) -> Result<(), String> {
    let session = signed_in(ctx, Screen::Profile).await?;
    let profile = &session.profile;

    println!("login: {}", profile.login);
    println!("name: {}", profile.full_name());
    println!("role: {}", profile.role);
    println!("age: {}", profile.age);
    println!("phone: {}", profile.phone_number);
    println!("region: {}", profile.region);
    println!();
    println!("screens:");

    for screen in screens_for(Some(session.role())) {
        println!("  {screen}");
    }

    Ok(())
}
