//! Page subcommand handlers: analyze, fill, detect.

use std::path::{Path, PathBuf};

use tracing::info;

use jobfill_config::Config;
use jobfill_dom::Document;
use jobfill_engine::{JobPageDetector, SiteClassifier};
use jobfill_protocols::{ContentRequest, ContentResponse, Profile};
use jobfill_runtime::{BackendClient, LocalStore, PopupStatus, SessionContext, TabBridge, TabId};

use crate::cli::PageArgs;

/// The CLI drives a single tab.
const TAB: TabId = 1;

pub(crate) struct FillArgs {
    pub profile: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub paced: bool,
    pub legacy: bool,
}

fn load_page(path: &Path) -> Result<Document, Box<dyn std::error::Error>> {
    let html = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    Ok(Document::parse(&html))
}

fn load_profile(path: &Path) -> Result<Profile, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    Ok(serde_json::from_str(&json)?)
}

async fn open_session(config: &Config) -> Result<SessionContext, Box<dyn std::error::Error>> {
    let backend = BackendClient::new(&config.backend)?;
    let store = LocalStore::open(&config.storage).await?;
    Ok(SessionContext::new(config, Box::new(backend), store))
}

fn open_tab(config: &Config, page: &PageArgs) -> Result<TabBridge, Box<dyn std::error::Error>> {
    let mut bridge = TabBridge::new(config);
    bridge.attach(TAB, load_page(&page.html)?, page.url.as_str());
    Ok(bridge)
}

/// List fields and their mappings.
pub(crate) async fn analyze(
    config: &Config,
    page: &PageArgs,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut bridge = open_tab(config, page)?;
    let mut session = open_session(config).await?;
    session.override_workday(page.workday_flag());

    let report = match session.analyze(&mut bridge, TAB).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", PopupStatus::from(&e));
            return Err(e.into());
        }
    };

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report.fields)?);
        }
        _ => {
            println!("{}", report.status);
            if !report.fields.is_empty() {
                println!();
                println!("{:<30} {:<10} {}", "FIELD", "TYPE", "MAPS TO");
                println!("{}", "-".repeat(60));
                for (field, (name, mapping)) in report.fields.iter().zip(report.rows()) {
                    println!("{:<30} {:<10} {}", name, field.kind.as_str(), mapping);
                }
            }
        }
    }
    Ok(())
}

/// Fill the page and optionally write the result.
pub(crate) async fn fill(
    config: &Config,
    page: &PageArgs,
    args: FillArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = config.clone();
    if !args.paced {
        config.fill = config.fill.immediate();
    }

    let mut bridge = open_tab(&config, page)?;
    let mut session = open_session(&config).await?;
    session.override_workday(page.workday_flag());
    if let Some(path) = &args.profile {
        session.use_profile(load_profile(path)?);
    }

    if args.legacy {
        let data = session.load_profile().await?;
        match bridge.send(TAB, ContentRequest::Autofill { data }).await? {
            ContentResponse::Legacy(response) => {
                let line = response.message.or(response.error).unwrap_or_default();
                println!("{}", line);
            }
            _ => return Err("Unexpected response to autofill".into()),
        }
    } else {
        match session.autofill(&mut bridge, TAB).await {
            Ok(status) => println!("{}", status),
            Err(e) => {
                eprintln!("{}", PopupStatus::from(&e));
                return Err(e.into());
            }
        }
    }

    if let Some(out) = &args.out {
        if let Some(script) = bridge.script(TAB) {
            std::fs::write(out, script.document().to_html())?;
            info!(path = %out.display(), "Wrote filled page");
        }
    }
    Ok(())
}

/// Print the job page verdict as JSON.
pub(crate) fn detect(config: &Config, page: &PageArgs) -> Result<(), Box<dyn std::error::Error>> {
    let document = load_page(&page.html)?;
    let variant = SiteClassifier::from_config(&config.sites).select(&page.url, page.workday_flag());
    let detection = JobPageDetector::from_config(&config.sites).detect(&document, variant);
    println!("{}", serde_json::to_string_pretty(&detection)?);
    Ok(())
}
