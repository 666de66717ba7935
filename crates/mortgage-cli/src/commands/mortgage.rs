use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};

use mortgage_core::mortgage::calculator::{
    self, LoanInput, DEFAULT_LOAN_TERM_YEARS, PMI_WAIVER_THRESHOLD_PERCENT, STANDARD_LOAN_TERMS,
};
use mortgage_core::mortgage::display;
use mortgage_core::mortgage::down_payment::{self, DOWN_PAYMENT_PRESETS};
use mortgage_core::mortgage::form::RawLoanInput;
use mortgage_core::MortgageError;

use crate::input;

/// Arguments for the amortization summary
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AmortizeArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Treat the input document as raw form fields (strings)
    #[arg(long)]
    pub form: bool,

    /// Use the calculator's default loan
    #[arg(long, conflicts_with = "input")]
    pub defaults: bool,

    /// Home price
    #[arg(long)]
    pub home_price: Option<Decimal>,

    /// Down payment amount
    #[arg(long, conflicts_with = "down_payment_percent")]
    pub down_payment: Option<Decimal>,

    /// Down payment as a percentage of the home price
    #[arg(long, alias = "dp-pct")]
    pub down_payment_percent: Option<Decimal>,

    /// Loan term in years
    #[arg(long, alias = "term", default_value_t = DEFAULT_LOAN_TERM_YEARS)]
    pub loan_term_years: u32,

    /// Annual interest rate in percent (6.5 = 6.5%)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<Decimal>,

    /// Annual property tax
    #[arg(long, default_value = "0")]
    pub property_tax: Decimal,

    /// Annual home insurance premium
    #[arg(long, default_value = "0")]
    pub home_insurance: Decimal,

    /// Annual PMI rate in percent of the loan amount
    #[arg(long, alias = "pmi", default_value = "0")]
    pub pmi_rate: Decimal,

    /// Emit whole-dollar display strings instead of raw decimals
    #[arg(long)]
    pub formatted: bool,
}

/// Arguments for the down payment preset calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct DownPaymentArgs {
    /// Home price
    #[arg(long)]
    pub home_price: Decimal,

    /// Percentage of the home price
    #[arg(long)]
    pub percent: Decimal,
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = resolve_loan_input(&args)?;
    tracing::debug!(?loan, "computing amortization");

    if args.formatted {
        let result = calculator::compute(&loan).inspect_err(log_rejection)?;
        let fields: Map<String, Value> = display::format_result(&result)
            .into_iter()
            .map(|(label, text)| (label.to_string(), Value::String(text)))
            .collect();
        return Ok(json!({ "result": fields }));
    }

    let output = calculator::analyze_mortgage(&loan).inspect_err(log_rejection)?;
    Ok(serde_json::to_value(output)?)
}

fn log_rejection(e: &MortgageError) {
    if e.is_validation() {
        tracing::warn!(code = e.code(), "loan input rejected: {}", e);
    } else {
        tracing::error!(code = e.code(), "calculation failed: {}", e);
    }
}

pub fn run_down_payment(args: DownPaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let amount = down_payment::down_payment_for_percent(args.home_price, args.percent)
        .inspect_err(log_rejection)?;
    let loan_amount = args
        .home_price
        .checked_sub(amount)
        .ok_or_else(|| MortgageError::Overflow {
            context: "loan amount".into(),
        })?
        .max(Decimal::ZERO);
    let percent_of_price = down_payment::down_payment_percent(args.home_price, amount)?;
    Ok(json!({
        "result": {
            "home_price": args.home_price,
            "percent": args.percent,
            "down_payment": amount,
            "down_payment_percent": percent_of_price,
            "loan_amount": loan_amount,
        }
    }))
}

pub fn run_presets() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(json!({
        "result": {
            "loan_terms_years": STANDARD_LOAN_TERMS,
            "default_loan_term_years": DEFAULT_LOAN_TERM_YEARS,
            "down_payment_percent_presets": DOWN_PAYMENT_PRESETS,
            "pmi_waiver_threshold_percent": PMI_WAIVER_THRESHOLD_PERCENT,
        }
    }))
}

/// Input precedence: `--input` file, `--defaults`, flags, then piped stdin.
fn resolve_loan_input(args: &AmortizeArgs) -> Result<LoanInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        tracing::debug!(path = %path, form = args.form, "reading loan input from file");
        return if args.form {
            let raw: RawLoanInput = input::file::read_document(path)?;
            Ok(raw.parse())
        } else {
            input::file::read_document(path)
        };
    }

    if args.defaults {
        return Ok(LoanInput::default());
    }

    if args.home_price.is_some() || args.interest_rate.is_some() {
        return loan_from_flags(args);
    }

    if let Some(data) = input::stdin::read_stdin()? {
        return if args.form {
            let raw: RawLoanInput = serde_json::from_value(data)?;
            Ok(raw.parse())
        } else {
            Ok(serde_json::from_value(data)?)
        };
    }

    Err("--home-price and --interest-rate, --input <file>, --defaults or stdin required".into())
}

fn loan_from_flags(args: &AmortizeArgs) -> Result<LoanInput, Box<dyn std::error::Error>> {
    // Missing flags read as zero, like an empty form box; the calculator
    // reports which one is invalid.
    let home_price = args.home_price.unwrap_or(Decimal::ZERO);
    let interest_rate = args.interest_rate.unwrap_or(Decimal::ZERO);

    let down_payment = match (args.down_payment, args.down_payment_percent) {
        (Some(amount), _) => amount,
        (None, Some(pct)) => down_payment::down_payment_for_percent(home_price, pct)?,
        (None, None) => Decimal::ZERO,
    };

    Ok(LoanInput {
        home_price,
        down_payment,
        loan_term_years: args.loan_term_years,
        annual_interest_rate_percent: interest_rate,
        annual_property_tax: args.property_tax,
        annual_home_insurance: args.home_insurance,
        pmi_annual_rate_percent: args.pmi_rate,
    })
}
