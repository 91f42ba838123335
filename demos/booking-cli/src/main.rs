//! Booking CLI
//!
//! Drives the gateway from a terminal, one command per run. The session is
//! kept in `BOOKING_SESSION_FILE` between runs.
//!
//! # Usage
//!
//! ```bash
//! export BOOKING_API_BASE_URL=https://booking.example.com
//! booking login a@b.com secret
//! booking workshop W1
//! booking book W1 2
//! booking logout
//! ```

use anyhow::{Context, bail};
use booking_gateway_auth::FileTokenStore;
use booking_gateway_client::{BookingGateway, GatewayConfig};
use booking_gateway_core::{Credentials, GatewayError, TicketRequest};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: booking <login EMAIL PASSWORD | forgot EMAIL | me | workshop ID | book WORKSHOP_ID QUANTITY | logout>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,booking_gateway_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env();
    tracing::debug!(
        base_url = %config.base_url,
        session_file = %config.session_file.display(),
        "Configuration loaded"
    );

    let store = FileTokenStore::new(config.session_file.clone());
    let gateway = BookingGateway::new(&config, store).context("invalid gateway configuration")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match run(&gateway, &args).await {
        Ok(()) => Ok(()),
        Err(e) => match e.downcast_ref::<GatewayError>() {
            Some(gateway_error) if gateway_error.requires_login() => {
                bail!("{} Run `booking login EMAIL PASSWORD`.", gateway_error.user_message())
            }
            Some(gateway_error) => bail!("{}", gateway_error.user_message()),
            None => Err(e),
        },
    }
}

async fn run(gateway: &BookingGateway<FileTokenStore>, args: &[&str]) -> anyhow::Result<()> {
    match args {
        ["login", email, password] => {
            let session = gateway
                .account()
                .login(Credentials::new(*email, *password))
                .await?;
            println!("Logged in as {}", session.user_email);
        }
        ["forgot", email] => {
            let message = gateway.account().forgot_password(email).await?;
            println!("{}", message.unwrap_or_else(|| "Reset email sent".to_string()));
        }
        ["me"] => {
            let profile = gateway.account().current_user().await?;
            println!("{} <{}>", profile.name, profile.email);
            if !gateway.account().profile_updated().await? {
                println!("Profile not completed yet");
            }
        }
        ["workshop", id] => {
            let workshop = gateway.workshops().fetch_workshop(id).await?;
            println!("{} ({})", workshop.workshop_name, workshop.workshop_id);
            println!("  starts:   {}", workshop.start_date);
            println!("  location: {}", workshop.location);
            println!("  price:    {}", workshop.price);
            if let Some(master_id) = &workshop.master_id {
                let master = gateway.workshops().fetch_master(master_id).await?;
                println!("  master:   {}", master.name);
            }
        }
        ["book", workshop_id, quantity] => {
            let quantity: u32 = quantity
                .parse()
                .with_context(|| format!("quantity must be a whole number, got {quantity:?}"))?;

            let mut flow = gateway.booking_flow();
            let group = flow
                .submit(&TicketRequest::new(*workshop_id, quantity))
                .await?;
            println!("Tickets reserved (group {})", group.group_id);

            let handoff = flow.start_payment().await?;
            println!("Pay here: {}", handoff.checkout_url);
        }
        ["logout"] => {
            gateway.account().logout().await?;
            println!("Logged out");
        }
        _ => bail!(USAGE),
    }
    Ok(())
}
