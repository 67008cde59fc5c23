use crate::app::state::TilesProvider;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// KML Viewer & Analyzer - View KML files on a map and inspect their features
pub struct Settings {
    /// KML (or GeoJSON) file to load on startup
    #[clap(short, long, value_name = "FILE")]
    pub kml_file: Option<PathBuf>,

    /// Feature line width in pixels
    #[clap(long, default_value = "2.0")]
    pub line_width: f32,

    /// Map tiles provider
    #[clap(long, value_enum, default_value_t = TilesProvider::OpenStreetMap)]
    pub tiles: TilesProvider,

    /// Ignore previously persisted settings and start fresh
    #[clap(long, default_value = "false")]
    pub ignore_persisted: bool,

    /// Print the summary and detail tables of --kml-file to stdout and exit
    #[clap(long, requires = "kml_file")]
    pub print_summary: bool,
}
