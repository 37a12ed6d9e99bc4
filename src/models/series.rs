/// The five data series the dashboard tracks. Four are editable fact tables,
/// the simulation is a read-only view fed by the pricing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    PriceReference,
    ExchangeRate,
    NationalVolume,
    ProvincialVolume,
    Simulation,
}

impl Series {
    /// Collection name used in HTTP routes and CLI arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PriceReference => "cp-aramco",
            Self::ExchangeRate => "kurs",
            Self::NationalVolume => "lpg-nasional",
            Self::ProvincialVolume => "lpg-provinsi",
            Self::Simulation => "simulasi",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PriceReference => "CP Aramco",
            Self::ExchangeRate => "Kurs",
            Self::NationalVolume => "LPG Nasional",
            Self::ProvincialVolume => "LPG Provinsi",
            Self::Simulation => "Simulasi LPG 3 Kg",
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            Self::PriceReference => "price_reference",
            Self::ExchangeRate => "exchange_rate",
            Self::NationalVolume => "national_volume",
            Self::ProvincialVolume => "provincial_volume",
            Self::Simulation => "v_simulation_lpg_3kg",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cp-aramco" | "cp" | "aramco" => Some(Self::PriceReference),
            "kurs" => Some(Self::ExchangeRate),
            "lpg-nasional" | "nasional" => Some(Self::NationalVolume),
            "lpg-provinsi" | "provinsi" => Some(Self::ProvincialVolume),
            "simulasi" | "simulasi-lpg-3kg" | "simulation" => Some(Self::Simulation),
            _ => None,
        }
    }

    pub fn all() -> &'static [Series] {
        &[
            Self::PriceReference,
            Self::ExchangeRate,
            Self::NationalVolume,
            Self::ProvincialVolume,
            Self::Simulation,
        ]
    }

    pub fn is_writable(&self) -> bool {
        !matches!(self, Self::Simulation)
    }
}

impl std::fmt::Display for Series {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
