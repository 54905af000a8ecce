//! Basic example demonstrating the Cloud Foundry API client.
//!
//! Run with:
//! ```
//! CF_TARGET=https://api.cf.example.com \
//! CF_USERNAME=admin CF_PASSWORD=secret \
//! cargo run --example basic
//! ```

use cfapi::CloudFoundry;

#[tokio::main]
async fn main() -> cfapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Cloud Foundry client...");
    let cf = CloudFoundry::from_env()?;

    // Authenticate: /info discovery plus the OAuth password grant
    let info = cf.login().await?;
    println!("Connected to: {} (version {:?})", info.name, info.version);

    // List organizations and spaces
    println!("\n--- Organizations ---");
    for org in cf.organizations().await? {
        println!("  - {} ({})", org.name, org.guid);
    }

    println!("\n--- Spaces ---");
    for space in cf.spaces().await? {
        println!("  - {} ({})", space.name, space.guid);
    }

    // List applications with their routes
    println!("\n--- Applications ---");
    let apps = cf.applications().await?;
    println!("Found {} applications", apps.len());

    for app in &apps {
        println!(
            "  - {}: {} x{} ({} MB)",
            app.name, app.state, app.instances, app.memory
        );

        for route in cf.application_routes(&app.guid).await? {
            println!("      route: {}", route.fqdn());
        }
    }

    // Per-instance stats for the first started app
    if let Some(app) = apps.iter().find(|a| a.is_started()) {
        println!("\n--- Instances of {} ---", app.name);
        for instance in cf.application_instances(&app.guid).await? {
            println!(
                "  #{} {:?} uptime={}s cpu={:.1}%",
                instance.index,
                instance.state,
                instance.uptime.as_secs(),
                instance.cpu * 100.0
            );
        }
    }

    Ok(())
}
