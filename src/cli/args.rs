// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// groupdist - Within- and between-group pairwise distance summaries
pub struct Args {
    /// path to distance matrix (.tsv, .csv or PHYLIP)
    #[argh(option)]
    pub distances: Option<String>,

    /// path to grouping table with header (sequence_id, group)
    #[argh(option)]
    pub groups: Option<String>,

    /// output summary file
    #[argh(option)]
    pub output: Option<String>,

    /// output format: tsv, csv, markdown, json (default: tsv)
    #[argh(option, default = "String::from(\"tsv\")")]
    pub format: String,

    /// distance matrix format: auto, tsv, csv, phylip (default: auto)
    #[argh(option, default = "String::from(\"auto\")")]
    pub matrix_format: String,

    /// grouping table delimiter: auto, comma, tab (default: auto)
    #[argh(option, default = "String::from(\"auto\")")]
    pub delimiter: String,

    /// separator between group names in inter-group labels (default: _)
    #[argh(option, default = "String::from(\"_\")")]
    pub separator: String,

    /// decimal places for mean/stddev/min/max (default: 2)
    #[argh(option, default = "2")]
    pub digits: usize,

    /// write statistics at full precision instead of rounding
    #[argh(switch)]
    pub raw: bool,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// exclude sequences whose identifier matches regex pattern
    #[argh(option)]
    pub exclude_samples: Option<String>,

    /// exclude sequences listed in a file (one identifier per line)
    #[argh(option)]
    pub exclude_samples_list: Option<String>,

    /// drop grouped sequences absent from the distance matrix instead of failing
    #[argh(switch)]
    pub drop_missing: bool,

    /// validate inputs without writing output (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
