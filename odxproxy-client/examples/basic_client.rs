// ODXProxy Client Example: partner lookup
// Reads connection settings from the environment, lists a few companies and
// prints their parent relation and reference.
//
//   ODX_API_KEY=... ODOO_URL=https://erp.example.com ODOO_DB=prod \
//   ODOO_USER_ID=2 ODOO_API_KEY=... cargo run --example basic_client

use anyhow::{Context, Result};
use odxproxy_client::{
    logging, params, Client, ClientConfig, ClientInfo, InstanceInfo, KeywordRequest, Many2One,
    OptionalField, DEFAULT_GATEWAY_URL,
};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
struct Partner {
    id: i64,
    name: String,
    parent_id: Many2One,
    #[serde(rename = "ref")]
    reference: OptionalField<String>,
}

fn env(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{name} is not set"))
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging("odxproxy=debug,info").map_err(|e| anyhow::anyhow!(e))?;

    let instance = InstanceInfo::new(
        env("ODOO_URL")?,
        env("ODOO_USER_ID")?.parse().context("ODOO_USER_ID must be numeric")?,
        env("ODOO_DB")?,
        env("ODOO_API_KEY")?,
    );
    let gateway =
        std::env::var("ODX_GATEWAY_URL").unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string());
    let info = ClientInfo::new(instance, env("ODX_API_KEY")?).with_gateway_url(gateway);

    let client = Client::connect(info, ClientConfig::default())?;

    let count = client
        .search_count(
            "res.partner",
            &params![params![params!["is_company", "=", true]]],
            KeywordRequest::new(),
            None,
        )
        .await?;
    info!("{} companies", count.result.unwrap_or_default());

    let keyword = KeywordRequest::new()
        .with_fields(["name", "parent_id", "ref"])
        .with_order("name asc")
        .with_limit(5);
    let partners = client
        .search_read::<Partner>(
            "res.partner",
            &params![params![params!["is_company", "=", true]]],
            keyword,
            None,
        )
        .await?;

    for partner in partners.result.unwrap_or_default() {
        info!(
            "#{} {} parent={} ref={}",
            partner.id,
            partner.name,
            partner.parent_id.name.as_deref().unwrap_or("-"),
            partner.reference.value().map(String::as_str).unwrap_or("-"),
        );
    }

    Ok(())
}
