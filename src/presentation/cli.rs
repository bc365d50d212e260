// Command line surface
use crate::application::water_quality_api::ExportFormat;
use crate::domain::measurement::WaterQualityInput;
use crate::domain::parameter::Parameter;
use crate::domain::trends::DEFAULT_TREND_DAYS;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "wq")]
#[command(about = "Water quality monitoring dashboard client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account
    Signup {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Remove the stored session token
    Logout,
    /// Show whether a session token is stored
    Status,
    /// Check that the service is reachable
    Health,
    /// Current WQI, parameter summary, recommendations and alerts
    Overview,
    /// Per-parameter trend charts
    Trends {
        /// Number of days to include
        #[arg(long, default_value_t = DEFAULT_TREND_DAYS)]
        days: u32,
        /// Only chart this parameter (key, slug or name)
        #[arg(long)]
        parameter: Option<Parameter>,
    },
    /// List the monitored parameters
    Parameters,
    /// Detailed analysis of one parameter
    Parameter {
        /// Parameter key, slug or name, e.g. `ph` or `dissolved-oxygen`
        parameter: Parameter,
    },
    /// Compare WQI across locations
    Compare {
        /// Comma separated location names
        #[arg(short, long, value_delimiter = ',', required = true)]
        locations: Vec<String>,
        #[arg(long, default_value_t = DEFAULT_TREND_DAYS)]
        days: u32,
    },
    /// Show a stored measurement
    Measurement { id: i64 },
    /// Analyze a new set of readings
    Measure {
        #[command(flatten)]
        readings: ReadingArgs,
        /// Also download the PDF report for these readings
        #[arg(long)]
        report: bool,
    },
    /// Download all measurements
    Export {
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ReadingArgs {
    /// °C, 0-40
    #[arg(long, default_value_t = 25.0)]
    pub temperature: f64,
    /// mg/L, 0-14
    #[arg(long, default_value_t = 7.0)]
    pub dissolved_oxygen: f64,
    /// 0-14
    #[arg(long, default_value_t = 7.0)]
    pub ph: f64,
    /// µS/cm, 0-2000
    #[arg(long, default_value_t = 500.0)]
    pub conductivity: f64,
    /// mg/L, 0-30
    #[arg(long, default_value_t = 5.0)]
    pub bod: f64,
    /// mg/L, 0-50
    #[arg(long, default_value_t = 10.0)]
    pub nitrate: f64,
    /// MPN/100mL, 0-500
    #[arg(long, default_value_t = 100.0)]
    pub fecal_coliform: f64,
    /// MPN/100mL, 0-1000
    #[arg(long, default_value_t = 200.0)]
    pub total_coliform: f64,
}

impl From<ReadingArgs> for WaterQualityInput {
    fn from(args: ReadingArgs) -> Self {
        WaterQualityInput {
            temperature: args.temperature,
            dissolved_oxygen: args.dissolved_oxygen,
            ph: args.ph,
            conductivity: args.conductivity,
            bod: args.bod,
            nitrate: args.nitrate,
            fecal_coliform: args.fecal_coliform,
            total_coliform: args.total_coliform,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Excel,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Excel => ExportFormat::Excel,
        }
    }
}
