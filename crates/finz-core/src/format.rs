/// Formats currency amounts for presentation.
///
/// Locale-aware implementations live with the CLI; services only need
/// this seam to build human-readable recommendations.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64) -> String;
}
