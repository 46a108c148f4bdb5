mod information_section;
mod legend_options_editor;

pub use information_section::InformationSection;
pub use legend_options_editor::LegendOptionsEditor;
