use clap::{Parser, Subcommand};
use if97::{If97Result, PropertyPack, StateInput, evaluate};
use if97_core::units::{k, kgm3, mpa};

#[derive(Parser)]
#[command(name = "if97-cli")]
#[command(about = "IAPWS-IF97 water/steam property calculator", long_about = None)]
struct Cli {
    /// Append transport properties (viscosity, conductivity,
    /// dielectric constant) where defined
    #[arg(long)]
    transport: bool,

    /// Log region-selection decisions to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// State from pressure [MPa] and temperature [K]
    Pt { p_mpa: f64, t_k: f64 },
    /// State from pressure [MPa] and specific enthalpy [kJ/kg]
    Ph { p_mpa: f64, h: f64 },
    /// State from pressure [MPa] and specific entropy [kJ/(kg K)]
    Ps { p_mpa: f64, s: f64 },
    /// State from specific enthalpy [kJ/kg] and entropy [kJ/(kg K)]
    Hs { h: f64, s: f64 },
    /// Two-phase state from pressure [MPa] and vapor fraction
    Px { p_mpa: f64, x: f64 },
    /// Two-phase state from temperature [K] and vapor fraction
    Tx { t_k: f64, x: f64 },
    /// Region 3 state from density [kg/m3] and temperature [K]
    RhoT { rho: f64, t_k: f64 },
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let input = match cli.command {
        Commands::Pt { p_mpa, t_k } => StateInput::Pt {
            p: mpa(p_mpa),
            t: k(t_k),
        },
        Commands::Ph { p_mpa, h } => StateInput::Ph { p: mpa(p_mpa), h },
        Commands::Ps { p_mpa, s } => StateInput::Ps { p: mpa(p_mpa), s },
        Commands::Hs { h, s } => StateInput::Hs { h, s },
        Commands::Px { p_mpa, x } => StateInput::Px { p: mpa(p_mpa), x },
        Commands::Tx { t_k, x } => StateInput::Tx { t: k(t_k), x },
        Commands::RhoT { rho, t_k } => StateInput::RhoT {
            rho: kgm3(rho),
            t: k(t_k),
        },
    };

    match run(input, cli.transport) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn run(input: StateInput, transport: bool) -> If97Result<String> {
    let pack = evaluate(input)?;
    let mut value = serde_json::to_value(&pack).unwrap_or_else(|_| serde_json::Value::Null);
    if transport && let Some(map) = value.as_object_mut() {
        map.insert("mu_pa_s".into(), optional(&pack, PropertyPack::dynamic_viscosity));
        map.insert(
            "lambda_w_m_k".into(),
            optional(&pack, PropertyPack::thermal_conductivity),
        );
        map.insert(
            "epsilon".into(),
            optional(&pack, PropertyPack::dielectric_constant),
        );
    }
    Ok(serde_json::to_string_pretty(&value).unwrap_or_default())
}

fn optional(
    pack: &PropertyPack,
    f: impl Fn(&PropertyPack) -> If97Result<f64>,
) -> serde_json::Value {
    match f(pack) {
        Ok(v) => serde_json::Value::from(v),
        Err(_) => serde_json::Value::Null,
    }
}
