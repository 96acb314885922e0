//! Common constants used throughout dprender.

/// Template root used when `--templates` is not given.
pub const DEFAULT_TEMPLATE_ROOT: &str = "./src/terraform/template";

/// Output root used when `--output` is not given.
pub const DEFAULT_OUTPUT_ROOT: &str = "./src/terraform/output";

/// File-name suffix marking a file as a template.
pub const TEMPLATE_SUFFIX: &str = ".jinja";

/// Extensions recognised as data product configuration files.
pub const CONFIG_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Environment names the templates are written for.
pub const KNOWN_ENVIRONMENTS: [&str; 3] = ["dev", "test", "prod"];

/// Ignore file read from the template root.
pub const IGNORE_FILE: &str = ".templateignore";

pub mod defaults {
    pub const NAME: &str = "demo-data-product";
    pub const DESCRIPTION: &str = "A demo data product for showcasing data product at scale";
    pub const CLASSIFICATION: &str = "Internal";
    pub const DIVISION: &str = "Data & Analytics";
    pub const BUSINESS_UNIT: &str = "Data Platforms & Engineering";
}
