//! Cloud Foundry API CLI binary.
//!
//! A command-line interface for interacting with a Cloud Foundry v2 instance.

use clap::Parser;
use std::process::ExitCode;

use cfapi::cli::{Cli, Collection, Command, Resource};
use cfapi::output::PrettyPrint;
use cfapi::{Application, CloudFoundry, Domain, Instance, Organization, Route, Space, User};
use serde::Serialize;
use tabled::{Table, Tabled};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let cf = match CloudFoundry::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set CF_TARGET, CF_USERNAME and CF_PASSWORD environment variables");
            return ExitCode::FAILURE;
        }
    };

    match run(&cf, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cf: &CloudFoundry, cli: Cli) -> cfapi::Result<()> {
    // Info is the one unauthenticated command
    if let Command::Info = cli.command {
        let info = cf.info().await?;
        return output_single_pretty(&info, cli.json);
    }

    cf.login().await?;

    match cli.command {
        Command::Info => unreachable!("handled above"),
        Command::Get { resource, guid } => handle_get(cf, resource, &guid, cli.json).await,
        Command::List { resource, app } => {
            handle_list(cf, resource, app.as_deref(), cli.json).await
        }
        Command::Scale { guid, instances } => {
            let app = cf.scale_application(&guid, instances).await?;
            output_single_pretty(&app, cli.json)
        }
        Command::Start { guid } => {
            let app = cf.start_application(&guid).await?;
            output_single_pretty(&app, cli.json)
        }
        Command::Stop { guid } => {
            let app = cf.stop_application(&guid).await?;
            output_single_pretty(&app, cli.json)
        }
    }
}

async fn handle_get(
    cf: &CloudFoundry,
    resource: Resource,
    guid: &str,
    json: bool,
) -> cfapi::Result<()> {
    match resource {
        Resource::App => {
            let app = cf.application(guid).await?;
            output_single_pretty(&app, json)
        }
        Resource::Job => {
            let job = cf.job(guid).await?;
            output_single_pretty(&job, json)
        }
    }
}

async fn handle_list(
    cf: &CloudFoundry,
    resource: Collection,
    app: Option<&str>,
    json: bool,
) -> cfapi::Result<()> {
    match resource {
        Collection::Apps => {
            let apps = cf.applications().await?;
            output_list(&apps, json, |a| AppRow::from(a))
        }
        Collection::Orgs => {
            let orgs = cf.organizations().await?;
            output_list(&orgs, json, |o| NamedRow::from(o))
        }
        Collection::Spaces => {
            let spaces = cf.spaces().await?;
            output_list(&spaces, json, |s| NamedRow::from(s))
        }
        Collection::Users => {
            let users = cf.users().await?;
            output_list(&users, json, |u| NamedRow::from(u))
        }
        Collection::Routes => {
            let routes = match app {
                Some(guid) => cf.application_routes(guid).await?,
                None => cf.routes().await?,
            };
            output_list(&routes, json, |r| RouteRow::from(r))
        }
        Collection::Domains => {
            let domains = cf.shared_domains().await?;
            output_list(&domains, json, |d| NamedRow::from(d))
        }
        Collection::Instances => {
            let guid = app.ok_or_else(|| {
                cfapi::CfError::InvalidArgument(
                    "--app required for listing instances".to_string(),
                )
            })?;
            let instances = cf.application_instances(guid).await?;
            output_list(&instances, json, |i| InstanceRow::from(i))
        }
    }
}

fn output_single_pretty<T: Serialize + PrettyPrint>(item: &T, json: bool) -> cfapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> cfapi::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} total", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct AppRow {
    guid: String,
    name: String,
    state: String,
    instances: u32,
    #[tabled(rename = "memory (MB)")]
    memory: u32,
}

impl From<&Application> for AppRow {
    fn from(a: &Application) -> Self {
        Self {
            guid: a.guid.clone(),
            name: a.name.clone(),
            state: a.state.to_string(),
            instances: a.instances,
            memory: a.memory,
        }
    }
}

#[derive(Tabled)]
struct NamedRow {
    guid: String,
    name: String,
}

impl From<&Organization> for NamedRow {
    fn from(o: &Organization) -> Self {
        Self {
            guid: o.guid.clone(),
            name: o.name.clone(),
        }
    }
}

impl From<&Space> for NamedRow {
    fn from(s: &Space) -> Self {
        Self {
            guid: s.guid.clone(),
            name: s.name.clone(),
        }
    }
}

impl From<&User> for NamedRow {
    fn from(u: &User) -> Self {
        Self {
            guid: u.guid.clone(),
            name: u.name.clone(),
        }
    }
}

impl From<&Domain> for NamedRow {
    fn from(d: &Domain) -> Self {
        Self {
            guid: d.guid.clone(),
            name: d.name.clone(),
        }
    }
}

#[derive(Tabled)]
struct RouteRow {
    guid: String,
    fqdn: String,
}

impl From<&Route> for RouteRow {
    fn from(r: &Route) -> Self {
        Self {
            guid: r.guid.clone(),
            fqdn: r.fqdn(),
        }
    }
}

#[derive(Tabled)]
struct InstanceRow {
    index: u32,
    state: String,
    host: String,
    #[tabled(rename = "uptime (s)")]
    uptime: u64,
}

impl From<&Instance> for InstanceRow {
    fn from(i: &Instance) -> Self {
        Self {
            index: i.index,
            state: format!("{:?}", i.state),
            host: i.host.clone().unwrap_or_default(),
            uptime: i.uptime.as_secs(),
        }
    }
}
