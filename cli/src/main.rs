use anyhow::Context as _;
use cellpack::{pack, segment::Segments, CellId, MemoryRegistry, Options, RegistryClient};
use clap::Parser;

use cli::{ChildrenParams, Cli, Commands, DecodeParams, DryRunParams, EncodeParams, InspectParams};

mod cli;
mod logging;

fn main() -> anyhow::Result<()> {
    logging::init()?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Encode(params) => encode(params),
        Commands::Decode(params) => decode(params),
        Commands::Inspect(params) => inspect(params),
        Commands::Children(params) => children(params),
        Commands::DryRun(params) => dry_run(params),
    }
}

fn encode(params: EncodeParams) -> anyhow::Result<()> {
    let packed = if params.single {
        let [token] = &params.tokens[..] else {
            anyhow::bail!("--single takes exactly one token, got {}", params.tokens.len());
        };
        cellpack::encode_single(token)?
    } else {
        cellpack::encode_set(&params.tokens[..])?
    };
    println!("{packed}");
    Ok(())
}

fn decode(params: DecodeParams) -> anyhow::Result<()> {
    if params.single {
        println!("{}", cellpack::decode_single(&params.packed)?);
    } else {
        for token in cellpack::decode_set(&params.packed)? {
            println!("{token}");
        }
    }
    Ok(())
}

fn inspect(params: InspectParams) -> anyhow::Result<()> {
    let bytes = pack::from_hex(&params.packed)?;
    let mut segments = Segments::new(&bytes);
    let mut index = 0;
    loop {
        let offset = segments.offset();
        let Some(segment) = segments.next() else {
            break;
        };
        let segment = segment.with_context(|| format!("bad segment at byte {offset}"))?;
        let kind = if index == 0 { "prefix" } else { "residue" };
        if segment.bit_len == 0 {
            println!("{offset:>4} {kind:<7} {:>2} bits", 0);
        } else {
            println!(
                "{offset:>4} {kind:<7} {:>2} bits {:0width$b}",
                segment.bit_len,
                segment.value,
                width = segment.bit_len as usize,
            );
        }
        index += 1;
    }
    Ok(())
}

fn children(params: ChildrenParams) -> anyhow::Result<()> {
    let cell: CellId = params
        .token
        .parse()
        .with_context(|| format!("invalid cell token {:?}", params.token))?;
    let children = cell
        .children()
        .with_context(|| format!("{cell} is a leaf cell"))?;
    for child in children {
        println!("{child}");
    }
    Ok(())
}

fn dry_run(params: DryRunParams) -> anyhow::Result<()> {
    let mut client = RegistryClient::new(MemoryRegistry::new(), Options::new());

    for parcel in &params.parcels {
        let tokens = parcel
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>();
        let packed = client.register(&tokens[..])?;
        println!("registered {} -> {packed}", tokens.join(","));
    }

    for query in &params.queries {
        let registered = client.registered_in(query)?;
        let occupied = client.occupied_quadrants(&[query])?;
        println!("{query}:");
        println!("  registered: {}", join_tokens(&registered));
        println!("  occupied quadrants: {}", join_tokens(&occupied));
    }

    Ok(())
}

fn join_tokens(cells: &[CellId]) -> String {
    cells
        .iter()
        .map(CellId::to_token)
        .collect::<Vec<_>>()
        .join(",")
}
