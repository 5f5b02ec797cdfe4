//! transfer_form - command line front-end
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │  Config  │───▶│  Fields  │───▶│  Engine  │───▶│   POST   │
//! │  (YAML)  │    │ (Draft)  │    │(Validate)│    │ (Submit) │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```
//!
//! Modes:
//! - `--mock-server`                 serve fixtures as the mock API
//! - `--list`                        print users and currencies
//! - `--from A --to B --currency C --amount X`   validate and submit

use std::sync::Arc;

use anyhow::Context;
use transfer_form::config::AppConfig;
use transfer_form::form::FormField;
use transfer_form::models::ReferenceData;
use transfer_form::transfer::{
    SubmitOutcome, TransferDraft, TransferField, TransferSubmissionFlow, ValidationResult,
};
use transfer_form::{HttpTransferApi, TransferApi};

// ============================================================
// ARGUMENTS
// ============================================================

fn get_arg(names: &[&str]) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| names.contains(&a.as_str()))
        .and_then(|i| args.get(i + 1).cloned())
}

fn has_flag(name: &str) -> bool {
    std::env::args().any(|a| a == name)
}

fn get_env() -> String {
    get_arg(&["--env", "-e"]).unwrap_or_else(|| "dev".to_string())
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    get_arg(&["--port"]).and_then(|p| p.parse().ok())
}

// ============================================================
// FORM
// ============================================================

/// The four inputs of the transfer form
struct TransferFormFields {
    from: FormField,
    to: FormField,
    currency: FormField,
    amount: FormField,
}

impl TransferFormFields {
    fn new() -> Self {
        Self {
            from: FormField::select(TransferField::FromUserId.as_str()),
            to: FormField::select(TransferField::ToUserId.as_str()),
            currency: FormField::select(TransferField::CurrencyId.as_str()),
            amount: FormField::decimal(TransferField::Amount.as_str()),
        }
    }

    fn field(&self, field: TransferField) -> &FormField {
        match field {
            TransferField::FromUserId => &self.from,
            TransferField::ToUserId => &self.to,
            TransferField::CurrencyId => &self.currency,
            TransferField::Amount => &self.amount,
        }
    }

    fn field_mut(&mut self, field: TransferField) -> &mut FormField {
        match field {
            TransferField::FromUserId => &mut self.from,
            TransferField::ToUserId => &mut self.to,
            TransferField::CurrencyId => &mut self.currency,
            TransferField::Amount => &mut self.amount,
        }
    }

    /// Selects hold display names/codes; resolve them to ids
    fn to_draft(&self, data: &ReferenceData) -> TransferDraft {
        TransferDraft {
            from_user_id: data.user_by_name(self.from.value()).map(|u| u.id),
            to_user_id: data.user_by_name(self.to.value()).map(|u| u.id),
            currency_id: data.currency_by_code(self.currency.value()).map(|c| c.id),
            amount: self.amount.value().to_string(),
        }
    }

    fn apply(&mut self, result: &ValidationResult) {
        for field in TransferField::ALL {
            let input = self.field_mut(field);
            input.set_errors(result.errors_for(field).to_vec());
            if input.has_errors() {
                tracing::debug!(field = input.name(), errors = input.errors().len(), "Field rejected");
            }
        }
    }

    fn print(&self, result: &ValidationResult) {
        for field in TransferField::ALL {
            for error in self.field(field).errors() {
                println!("  {:<9} {}", field.label(), error.message);
            }
        }
        if let Some(hint) = &result.hint {
            println!("  hint      {}", hint);
        }
    }
}

// ============================================================
// MODES
// ============================================================

#[cfg(feature = "mock-api")]
async fn run_mock_server(config: &AppConfig) -> anyhow::Result<()> {
    let mut server_config = config.mock_server.clone();
    if let Some(port) = get_port_override() {
        server_config.port = port;
    }
    println!(
        "Mock API listening on http://{}:{}",
        server_config.host, server_config.port
    );
    transfer_form::mock_server::serve(&server_config).await
}

#[cfg(not(feature = "mock-api"))]
async fn run_mock_server(_config: &AppConfig) -> anyhow::Result<()> {
    anyhow::bail!("mock server not compiled in (enable the `mock-api` feature)")
}

async fn run_list(flow: &mut TransferSubmissionFlow) -> anyhow::Result<()> {
    let data = flow
        .load_reference_data()
        .await
        .context("Failed to load reference data")?;

    println!("Users:");
    for user in &data.users {
        let balances: Vec<String> = user
            .currencies
            .iter()
            .map(|(code, balance)| format!("{code} {balance}"))
            .collect();
        println!("  {:>3}  {:<8} {}", user.id, user.name, balances.join(", "));
    }
    println!("Currencies:");
    for currency in &data.currencies {
        println!(
            "  {:>3}  {:<4} {:<16} decimals={}",
            currency.id, currency.code, currency.name, currency.decimals
        );
    }
    Ok(())
}

async fn run_submit(flow: &mut TransferSubmissionFlow) -> anyhow::Result<bool> {
    if flow.load_reference_data().await.is_err() {
        for note in flow.drain_notifications() {
            eprintln!("{}: {}", note.title, note.text);
        }
        return Ok(false);
    }

    let mut fields = TransferFormFields::new();
    let inputs = [
        (TransferField::FromUserId, "--from"),
        (TransferField::ToUserId, "--to"),
        (TransferField::CurrencyId, "--currency"),
        (TransferField::Amount, "--amount"),
    ];
    for (field, flag) in inputs {
        if let Some(value) = get_arg(&[flag]) {
            fields.field_mut(field).set_value(value);
        }
    }

    let data = flow.reference_data();
    let mut draft = fields.to_draft(&data);
    tracing::info!(draft = ?draft, "Draft built from arguments");

    let accepted = match flow.submit(&mut draft).await {
        SubmitOutcome::Rejected(result) => {
            println!("Transfer form has errors:");
            fields.apply(&result);
            fields.print(&result);
            false
        }
        SubmitOutcome::Submitted(response) => {
            println!("Transfer #{} accepted", response.transfer_id);
            true
        }
        SubmitOutcome::Failed(_) => false,
    };

    for note in flow.drain_notifications() {
        println!("{}: {}", note.title, note.text);
    }
    Ok(accepted)
}

// ============================================================
// MAIN
// ============================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = transfer_form::logging::init_logging(&app_config);

    tracing::info!(
        git_hash = env!("GIT_HASH"),
        "Starting transfer_form in {} mode",
        env
    );

    if has_flag("--mock-server") {
        return run_mock_server(&app_config).await;
    }

    let api: Arc<dyn TransferApi> = Arc::new(HttpTransferApi::new(app_config.api.clone())?);
    let mut flow = TransferSubmissionFlow::new(api);

    if has_flag("--list") {
        return run_list(&mut flow).await;
    }

    if !run_submit(&mut flow).await? {
        anyhow::bail!("transfer was not submitted");
    }
    Ok(())
}
