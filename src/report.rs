//! Human-readable reports of the carbon calculation: a summary sheet with
//! localized labels, the technical data sheet and a Markdown document.

use serde::{Deserialize, Serialize};
use time::{macros::format_description, OffsetDateTime};
use tinytemplate::TinyTemplate;

use crate::{ratio, Result, Totals, TripEmissions, VehicleType};

static TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/report_template.md"
));
static TEMPLATE_NAME: &str = "report";

/// Language of the labels of a report
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Pt,
}

#[derive(Debug, Clone, Copy)]
enum Label {
    Vehicle,
    Fuel,
    Liters,
    ManufactureYear,
    VehicleAge,
    Distance,
    BaseEmission,
    AgeFactor,
    FinalEmission,
    IntensityPerKm,
    Load,
    IntensityPerTon,
    Efficiency,
    Email,
    ReportDate,
    Car,
    Truck,
    NotInformed,
    Title,
    TripData,
    Results,
    SectorComparison,
    Item,
    Value,
    Sector,
    TripOverSector,
    PassengerCar,
    HeavyTruck,
    Origin,
    Destination,
    Trips,
    TotalBaseEmission,
    TotalFinalEmission,
}

fn label(label: Label, locale: Locale) -> &'static str {
    use Label::*;
    match locale {
        Locale::En => match label {
            Vehicle => "Vehicle type",
            Fuel => "Fuel",
            Liters => "Liters consumed (L)",
            ManufactureYear => "Year of manufacture",
            VehicleAge => "Vehicle age (years)",
            Distance => "Distance traveled (km)",
            BaseEmission => "Base emission (tCO2e)",
            AgeFactor => "Age factor",
            FinalEmission => "Final emission (tCO2e)",
            IntensityPerKm => "Intensity per km (tCO2e/km)",
            Load => "Load transported (tons)",
            IntensityPerTon => "Intensity per ton (tCO2e/ton)",
            Efficiency => "Efficiency (km/L)",
            Email => "E-mail",
            ReportDate => "Report date",
            Car => "Car",
            Truck => "Truck",
            NotInformed => "Not informed",
            Title => "Carbon emission report",
            TripData => "Trip data",
            Results => "Results",
            SectorComparison => "Sector comparison",
            Item => "Item",
            Value => "Value",
            Sector => "Sector",
            TripOverSector => "Trip / sector",
            PassengerCar => "Average passenger car",
            HeavyTruck => "Average heavy truck",
            Origin => "Origin",
            Destination => "Destination",
            Trips => "Trips",
            TotalBaseEmission => "Total base emission (tCO2e)",
            TotalFinalEmission => "Total final emission (tCO2e)",
        },
        Locale::Pt => match label {
            Vehicle => "Tipo de veículo",
            Fuel => "Combustível",
            Liters => "Litros consumidos (L)",
            ManufactureYear => "Ano de fabricação",
            VehicleAge => "Idade do veículo (anos)",
            Distance => "Quilômetros rodados (km)",
            BaseEmission => "Emissão base (tCO2e)",
            AgeFactor => "Fator de idade",
            FinalEmission => "Emissão final (tCO2e)",
            IntensityPerKm => "Intensidade por km (tCO2e/km)",
            Load => "Carga transportada (toneladas)",
            IntensityPerTon => "Intensidade por tonelada (tCO2e/ton)",
            Efficiency => "Eficiência (km/L)",
            Email => "E-mail",
            ReportDate => "Data do relatório",
            Car => "Carro",
            Truck => "Caminhão",
            NotInformed => "Não informado",
            Title => "Relatório de emissão de carbono",
            TripData => "Dados da viagem",
            Results => "Resultados",
            SectorComparison => "Comparação setorial",
            Item => "Item",
            Value => "Valor",
            Sector => "Setor",
            TripOverSector => "Viagem / setor",
            PassengerCar => "Carro de passeio médio",
            HeavyTruck => "Caminhão pesado médio",
            Origin => "Origem",
            Destination => "Destino",
            Trips => "Viagens",
            TotalBaseEmission => "Emissão base total (tCO2e)",
            TotalFinalEmission => "Emissão final total (tCO2e)",
        },
    }
}

/// Reference emission intensities (tCO2e/km) of the sector comparison
const SECTOR_REFERENCES: [(Label, f64); 2] = [
    (Label::PassengerCar, 0.00017),
    (Label::HeavyTruck, 0.0009),
];

/// Who and what a single-trip report is about
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub vehicle_type: VehicleType,
    pub email: Option<String>,
    /// origin address, as typed
    pub origin: Option<String>,
    /// destination address, as typed
    pub destination: Option<String>,
    /// when the report was generated
    pub generated: OffsetDateTime,
    pub locale: Locale,
}

impl ReportContext {
    fn label(&self, label: Label) -> &'static str {
        self::label(label, self.locale)
    }

    fn vehicle(&self) -> &'static str {
        match self.vehicle_type {
            VehicleType::Car => self.label(Label::Car),
            VehicleType::Truck => self.label(Label::Truck),
        }
    }

    fn is_truck(&self) -> bool {
        self.vehicle_type == VehicleType::Truck
    }

    fn load(&self, trip: &TripEmissions) -> SummaryRow {
        self.row(Label::Load, format!("{:.2}", trip.load_tons))
    }

    fn informed(&self, value: &Option<String>) -> String {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map_or_else(|| self.label(Label::NotInformed).to_string(), str::to_string)
    }

    fn email(&self) -> String {
        self.informed(&self.email)
    }

    fn generated(&self) -> Result<String> {
        Ok(self
            .generated
            .format(format_description!("[day]/[month]/[year] [hour]:[minute]"))?)
    }

    fn row(&self, label: Label, value: String) -> SummaryRow {
        SummaryRow {
            item: self.label(label).to_string(),
            value,
        }
    }
}

/// A line of the summary sheet
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub item: String,
    pub value: String,
}

fn trip_rows(trip: &TripEmissions, context: &ReportContext, with_load: bool) -> Vec<SummaryRow> {
    let mut rows = vec![
        context.row(Label::Vehicle, context.vehicle().to_string()),
        context.row(Label::Fuel, trip.fuel_type.clone()),
        context.row(Label::Liters, format!("{:.2}", trip.fuel_liters)),
        context.row(Label::ManufactureYear, trip.manufacture_year.to_string()),
        context.row(Label::VehicleAge, trip.vehicle_age.to_string()),
        context.row(Label::Distance, format!("{:.2}", trip.distance_km)),
    ];
    if with_load && context.is_truck() {
        rows.push(context.load(trip));
    }
    rows
}

fn result_rows(trip: &TripEmissions, context: &ReportContext, with_load: bool) -> Vec<SummaryRow> {
    let mut rows = vec![
        context.row(Label::BaseEmission, format!("{:.4}", trip.base_emission)),
        context.row(Label::AgeFactor, format!("{:.4}", trip.age_factor)),
        context.row(Label::FinalEmission, format!("{:.4}", trip.final_emission)),
        context.row(Label::IntensityPerKm, format!("{:.6}", trip.intensity_per_km)),
    ];
    if context.is_truck() {
        if with_load {
            rows.push(context.load(trip));
        }
        rows.push(context.row(
            Label::IntensityPerTon,
            format!("{:.6}", trip.intensity_per_ton),
        ));
    }
    rows.push(context.row(
        Label::Efficiency,
        format!("{:.2}", trip.efficiency_km_per_liter),
    ));
    rows
}

/// Returns the summary sheet of a single trip: one localized `item, value` row per result.
/// Trucks additionally report the load and the intensity per ton, before the efficiency.
/// # Error
/// Errors if the report date cannot be formatted
pub fn summary(trip: &TripEmissions, context: &ReportContext) -> Result<Vec<SummaryRow>> {
    let mut rows = trip_rows(trip, context, false);
    rows.extend(result_rows(trip, context, true));
    rows.push(context.row(Label::Email, context.email()));
    rows.push(context.row(Label::ReportDate, context.generated()?));
    Ok(rows)
}

/// Returns the summary sheet of a fleet: number of trips and total emissions.
pub fn fleet_summary(totals: &Totals, locale: Locale) -> Vec<SummaryRow> {
    let row = |l: Label, value: String| SummaryRow {
        item: label(l, locale).to_string(),
        value,
    };
    vec![
        row(Label::Trips, totals.trips.to_string()),
        row(Label::TotalBaseEmission, format!("{:.3}", totals.base_emission)),
        row(Label::TotalFinalEmission, format!("{:.3}", totals.final_emission)),
    ]
}

#[derive(Serialize)]
struct SectorRow {
    sector: &'static str,
    intensity_per_km: String,
    ratio: String,
}

fn comparison(trip: &TripEmissions, context: &ReportContext) -> Vec<SectorRow> {
    SECTOR_REFERENCES
        .iter()
        .map(|(sector, reference)| SectorRow {
            sector: context.label(*sector),
            intensity_per_km: format!("{reference:.6}"),
            ratio: format!("{:.2}", ratio(trip.intensity_per_km, *reference)),
        })
        .collect()
}

#[derive(Serialize)]
struct Document {
    title: &'static str,
    generated_label: &'static str,
    generated: String,
    email_label: &'static str,
    email: String,
    vehicle_label: &'static str,
    vehicle: &'static str,
    origin_label: &'static str,
    origin: String,
    destination_label: &'static str,
    destination: String,
    trip_data_title: &'static str,
    results_title: &'static str,
    comparison_title: &'static str,
    item_header: &'static str,
    value_header: &'static str,
    sector_header: &'static str,
    intensity_header: &'static str,
    ratio_header: &'static str,
    trip_rows: Vec<SummaryRow>,
    result_rows: Vec<SummaryRow>,
    comparison: Vec<SectorRow>,
}

/// Renders the Markdown document of a single trip: cover, trip data, results
/// and a comparison against reference intensities of the sector.
/// # Error
/// Errors if the template cannot be rendered
pub fn document(trip: &TripEmissions, context: &ReportContext) -> Result<String> {
    let document = Document {
        title: context.label(Label::Title),
        generated_label: context.label(Label::ReportDate),
        generated: context.generated()?,
        email_label: context.label(Label::Email),
        email: context.email(),
        vehicle_label: context.label(Label::Vehicle),
        vehicle: context.vehicle(),
        origin_label: context.label(Label::Origin),
        origin: context.informed(&context.origin),
        destination_label: context.label(Label::Destination),
        destination: context.informed(&context.destination),
        trip_data_title: context.label(Label::TripData),
        results_title: context.label(Label::Results),
        comparison_title: context.label(Label::SectorComparison),
        item_header: context.label(Label::Item),
        value_header: context.label(Label::Value),
        sector_header: context.label(Label::Sector),
        intensity_header: context.label(Label::IntensityPerKm),
        ratio_header: context.label(Label::TripOverSector),
        trip_rows: trip_rows(trip, context, true),
        result_rows: result_rows(trip, context, false),
        comparison: comparison(trip, context),
    };

    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template(TEMPLATE_NAME, TEMPLATE)?;
    Ok(tt.render(TEMPLATE_NAME, &document)?)
}

/// The technical data sheet: every field of every trip, as CSV
/// # Error
/// Errors if a trip cannot be serialized
pub fn technical_data(trips: &[TripEmissions]) -> Result<Vec<u8>> {
    Ok(crate::csv::serialize(trips.iter())?)
}

/// The summary sheet as CSV
/// # Error
/// Errors if a row cannot be serialized
pub fn summary_csv(rows: &[SummaryRow]) -> Result<Vec<u8>> {
    Ok(crate::csv::serialize(rows.iter())?)
}

/// Returns the name of a report file generated at `generated`,
/// e.g. `carbon_report_20250304_101500_summary.csv` for suffix `_summary.csv`
/// # Error
/// Errors if the date cannot be formatted
pub fn file_name(generated: OffsetDateTime, suffix: &str) -> Result<String> {
    let stamp = generated.format(format_description!(
        "[year][month][day]_[hour][minute][second]"
    ))?;
    Ok(format!("carbon_report_{stamp}{suffix}"))
}
