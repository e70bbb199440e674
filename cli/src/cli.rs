use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pack cell tokens into the hex form sent to the registry.
    Encode(EncodeParams),
    /// Unpack a hex payload into cell tokens, one per line.
    Decode(DecodeParams),
    /// Print the segments of a packed payload.
    ///
    /// Each line shows the segment's bit length and its payload bits, most significant first.
    Inspect(InspectParams),
    /// Print the four child tokens of a cell.
    Children(ChildrenParams),
    /// Register parcels into an in-memory registry, then query it.
    ///
    /// Goes through the same client, cache and wire format as a real registry would.
    DryRun(DryRunParams),
}

#[derive(Clone, Debug, Args)]
pub struct EncodeParams {
    /// Pack a single cell as a query instead of a parcel.
    #[arg(long)]
    pub single: bool,

    /// Cell tokens, e.g. `89c25`.
    #[arg(required = true)]
    pub tokens: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct DecodeParams {
    /// Decode a single packed query cell instead of a parcel.
    #[arg(long)]
    pub single: bool,

    /// The packed payload. The `0x` prefix is optional.
    pub packed: String,
}

#[derive(Clone, Debug, Args)]
pub struct InspectParams {
    /// The packed payload. The `0x` prefix is optional.
    pub packed: String,
}

#[derive(Clone, Debug, Args)]
pub struct ChildrenParams {
    pub token: String,
}

#[derive(Clone, Debug, Args)]
pub struct DryRunParams {
    /// A parcel to register, as comma-separated cell tokens. May be repeated.
    #[arg(long = "parcel")]
    pub parcels: Vec<String>,

    /// A cell to query after registration. May be repeated.
    #[arg(long = "query")]
    pub queries: Vec<String>,
}
