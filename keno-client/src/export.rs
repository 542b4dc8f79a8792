use anyhow::Result;
use domain::DrawRecord;

const CSV_HEADER: &str = "Draw,Date,Numbers";

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON array of draw records
    Json,
    /// One row per draw, numbers separated by spaces
    Csv,
}

impl ExportFormat {
    pub fn default_file_name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "keno-archive.json",
            ExportFormat::Csv => "keno-archive.csv",
        }
    }
}

pub fn render(format: ExportFormat, draws: &[DrawRecord]) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(draws)?),
        ExportFormat::Csv => Ok(to_csv(draws)),
    }
}

fn to_csv(draws: &[DrawRecord]) -> String {
    let mut lines = Vec::with_capacity(draws.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for draw in draws {
        let numbers: Vec<String> = draw.numbers.iter().map(u8::to_string).collect();
        lines.push(format!(
            "{},{},{}",
            draw.draw_number,
            draw.date,
            numbers.join(" ")
        ));
    }

    lines.join("\n")
}
