//! RegionEngine CLI entry point
//!
//! Small command-line front end over the coordinate and interval engine.
//! Intervals are given as `START-END` on the command line; nothing is read
//! from or written to files.

use clap::{Parser, Subcommand, ValueEnum};
use region_engine::core::{
    contains, distance, nearest, overlaps, percentage_overlap, relative_strand_symbol,
    resolve_display_strand, within, CoordinateSystem, CoordinateTransformer, HierarchicalRegionCodec,
    Indexing, Interval, Orientation, Region, Sequence, TypeFilter,
};
use region_engine::formats::{parse_orientation_policy, BlockFields, CoordinateSelector};

/// Strand symbol (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OrientationArg {
    /// Direct strand (+)
    #[default]
    #[value(name = "plus", alias = "+")]
    Plus,
    /// Reverse strand (-)
    #[value(name = "minus", alias = "-")]
    Minus,
    /// Unknown strand (.)
    #[value(name = "none", alias = ".")]
    Unknown,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Plus => Orientation::Direct,
            OrientationArg::Minus => Orientation::Reverse,
            OrientationArg::Unknown => Orientation::Indeterminate,
        }
    }
}

/// Indexing convention of genomic coordinates (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum IndexingArg {
    /// 1-based, end-inclusive
    #[default]
    #[value(name = "one-based")]
    OneBased,
    /// 0-based, end-exclusive (BED)
    #[value(name = "bed")]
    Bed,
    /// 1-based, end-inclusive (GFF)
    #[value(name = "gff")]
    Gff,
    /// 0-based, end-inclusive
    #[value(name = "zero-based")]
    ZeroBased,
}

impl From<IndexingArg> for Indexing {
    fn from(arg: IndexingArg) -> Self {
        match arg {
            IndexingArg::OneBased => Indexing::CANONICAL,
            IndexingArg::Bed => Indexing::BED,
            IndexingArg::Gff => Indexing::GFF,
            IndexingArg::ZeroBased => Indexing::new(true, false),
        }
    }
}

#[derive(Parser)]
#[command(name = "region-engine")]
#[command(about = "Coordinate and interval relationship engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an interval between coordinate systems of one sequence
    Convert {
        /// Interval to convert (START-END)
        interval: String,
        /// Sequence genomic start (1-based)
        #[arg(long = "seq-start")]
        seq_start: i64,
        /// Sequence genomic end (inclusive)
        #[arg(long = "seq-end")]
        seq_end: i64,
        /// Strand of the sequence
        #[arg(long = "seq-strand", default_value = "plus")]
        seq_strand: OrientationArg,
        /// Transcription start site (genomic)
        #[arg(long)]
        tss: Option<i64>,
        /// Transcription end site (genomic)
        #[arg(long)]
        tes: Option<i64>,
        /// Display strand policy: Direct, Reverse, Relative, Opposite
        #[arg(long, default_value = "Relative")]
        policy: String,
        /// Source position: genomic, relative, tss, tes
        #[arg(long, default_value = "genomic")]
        from: String,
        /// Target position: genomic, relative, tss, tes
        #[arg(long, default_value = "relative")]
        to: String,
        /// Indexing of genomic coordinates
        #[arg(long, default_value = "one-based")]
        indexing: IndexingArg,
        /// Number given to the first displayed base in relative coordinates
        #[arg(long = "relative-offset", default_value = "1")]
        relative_offset: i64,
        /// Skip position 0 in anchor-relative coordinates
        #[arg(long = "skip-zero")]
        skip_zero: bool,
        /// Strand of the interval itself
        #[arg(long, default_value = "none")]
        strand: OrientationArg,
    },
    /// Report relationships between two canonical intervals
    Relate {
        /// First interval (START-END)
        a: String,
        /// Second interval (START-END)
        b: String,
        /// Radius for the within test
        #[arg(short = 'r', long, default_value = "0")]
        radius: i64,
    },
    /// Find the nearest candidate to a query interval
    Nearest {
        /// Query interval (START-END)
        query: String,
        /// Candidate intervals (START-END)
        #[arg(required = true)]
        candidates: Vec<String>,
        /// Accept overlapping candidates
        #[arg(long = "allow-overlap")]
        allow_overlap: bool,
    },
    /// Decode BED12 block columns into child intervals
    Blocks {
        /// Parent chromStart (0-based)
        chrom_start: i64,
        /// Parent chromEnd (exclusive)
        chrom_end: i64,
        /// blockCount column
        block_count: String,
        /// blockSizes column
        block_sizes: String,
        /// blockStarts column
        block_starts: String,
        /// thickStart column
        #[arg(long = "thick-start")]
        thick_start: Option<String>,
        /// thickEnd column
        #[arg(long = "thick-end")]
        thick_end: Option<String>,
    },
    /// Resolve the display strand and a region's relative strand symbol
    Strand {
        /// Display strand policy: Direct, Reverse, Relative, Opposite
        policy: String,
        /// Strand of the sequence
        #[arg(long = "seq-strand", default_value = "plus")]
        seq_strand: OrientationArg,
        /// Strand of the region
        #[arg(long = "region-strand", default_value = "plus")]
        region_strand: OrientationArg,
    },
}

/// Parse `START-END`; a leading '-' belongs to the start
fn parse_interval(s: &str) -> anyhow::Result<Interval> {
    let s = s.trim();
    let split = s
        .get(1..)
        .and_then(|rest| rest.find('-'))
        .map(|i| i + 1)
        .ok_or_else(|| anyhow::anyhow!("Expected START-END, got '{}'", s))?;
    let start = s[..split]
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid start in '{}'", s))?;
    let end = s[split + 1..]
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid end in '{}'", s))?;
    Ok(Interval { start, end })
}

fn selector(position: &str, indexing: Indexing, relative_offset: i64, skip_zero: bool) -> anyhow::Result<CoordinateSystem> {
    Ok(CoordinateSelector::parse(position)?
        .with_indexing(indexing)
        .with_relative_offset(relative_offset)
        .with_skip_zero(skip_zero)
        .coordinate_system())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            interval,
            seq_start,
            seq_end,
            seq_strand,
            tss,
            tes,
            policy,
            from,
            to,
            indexing,
            relative_offset,
            skip_zero,
            strand,
        } => {
            let mut sequence = Sequence::new("sequence", seq_start, seq_end, seq_strand.into());
            if let Some(tss) = tss {
                sequence = sequence.with_tss(tss);
            }
            if let Some(tes) = tes {
                sequence = sequence.with_tes(tes);
            }

            let display = resolve_display_strand(parse_orientation_policy(&policy)?, sequence.orientation);
            let transformer = CoordinateTransformer::new(&sequence, display)?;

            let from = selector(&from, indexing.into(), relative_offset, skip_zero)?;
            let to = selector(&to, indexing.into(), relative_offset, skip_zero)?;
            let value = parse_interval(&interval)?;

            let (canonical, canonical_strand) = transformer.to_canonical_stranded(value, from, strand.into())?;
            let (converted, converted_strand) = transformer.from_canonical_stranded(canonical, to, canonical_strand)?;

            eprintln!("Display strand: {}", display);
            eprintln!("{} -> {}", from, to);
            println!("{}\t{}", converted, converted_strand);
        }

        Commands::Relate { a, b, radius } => {
            let a = parse_interval(&a)?;
            let b = parse_interval(&b)?;

            println!("overlaps\t{}", overlaps(&a, &b)?);
            println!("a_contains_b\t{}", contains(&a, &b)?);
            println!("b_contains_a\t{}", contains(&b, &a)?);
            println!("distance\t{}", distance(&a, &b)?);
            println!("percentage_overlap\t{:.4}", percentage_overlap(&a, &b)?);
            println!("within\t{}", within(&a, &b, radius)?);
        }

        Commands::Nearest {
            query,
            candidates,
            allow_overlap,
        } => {
            let query = Region::new("sequence", parse_interval(&query)?, "query");

            let mut regions = candidates
                .iter()
                .enumerate()
                .map(|(i, c)| Ok(Region::new("sequence", parse_interval(c)?, format!("candidate{}", i + 1))))
                .collect::<anyhow::Result<Vec<_>>>()?;
            regions.sort_by_key(|r| r.start());

            match nearest(&query, &regions, allow_overlap, &TypeFilter::Any)? {
                Some(neighbor) => {
                    let region = &regions[neighbor.index];
                    println!("{}\t{}\t{}", region.region_type, region.interval, neighbor.distance);
                }
                None => {
                    eprintln!("No qualifying candidate");
                }
            }
        }

        Commands::Blocks {
            chrom_start,
            chrom_end,
            block_count,
            block_sizes,
            block_starts,
            thick_start,
            thick_end,
        } => {
            let codec = HierarchicalRegionCodec::bed();
            let parent_interval = Indexing::BED.to_canonical(Interval {
                start: chrom_start,
                end: chrom_end,
            })?;
            let mut parent = Region::new("sequence", parent_interval, "parent");

            let encoding = BlockFields::parse(
                &block_count,
                &block_sizes,
                &block_starts,
                thick_start.as_deref(),
                thick_end.as_deref(),
            )?;
            codec.decode_into(&mut parent, &encoding)?;

            eprintln!("Decoded {} blocks", parent.children.len());
            for child in &parent.children {
                let bed = Indexing::BED.from_canonical(child.interval);
                println!("{}\t{}\t{}", child.region_type, bed.start, bed.end);
            }
            if let Some(thick) = parent.thick_range() {
                let bed = Indexing::BED.from_canonical(thick);
                println!("thick\t{}\t{}", bed.start, bed.end);
            }
        }

        Commands::Strand {
            policy,
            seq_strand,
            region_strand,
        } => {
            let display = resolve_display_strand(parse_orientation_policy(&policy)?, seq_strand.into());
            println!("display\t{}", display);
            println!("relative\t{}", relative_strand_symbol(region_strand.into(), display));
        }
    }

    Ok(())
}
