use std::env;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;
use std::time::Instant;

use log::{error, info, warn, Level};

use layer_stack::Error;
use layer_stack::align::Stack;
use layer_stack::export::StackDoc;
use layer_stack::settings::Settings;
use layer_stack::slice::{cut_heights, slice_layers};

const USAGE: &str = "layer-stack-rs <mesh.stl> [settings.json] [output.json]";

fn main(){
    init_logger();
    if let Err(err) = run() {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(),Error> {
    let start_time = Instant::now();
    let mut args = env::args().skip(1);
    let mesh_path = PathBuf::from(args.next().ok_or_else(|| Error::Usage(USAGE.into()))?);
    let settings = match args.next() {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    let out_path = args.next()
        .map(PathBuf::from)
        .unwrap_or_else(|| mesh_path.with_extension("json"));

    let mut reader = BufReader::new(File::open(&mesh_path)?);
    let mesh = stl_io::read_stl(&mut reader)?;
    info!("loaded {} in {:?}",mesh_path.display(),start_time.elapsed());

    let now = Instant::now();
    let heights = cut_heights(&mesh, settings.thickness);
    let sliced = slice_layers(&mesh, &heights, &settings)?;
    if !sliced.failed.is_empty() {
        warn!("{} of {} planes could not be assembled",sliced.failed.len(),heights.len());
    }
    info!("sliced {} layers in {:?}",sliced.layers.len(),now.elapsed());

    let now = Instant::now();
    let mut stack = Stack::from_layers(sliced.layers);
    let report = stack.align(&settings);
    info!("aligned in {:?}, {} problems",now.elapsed(),report.errors.len());

    StackDoc::from_stack(&stack, &settings).write_json(&out_path)?;
    info!("wrote {}",out_path.display());
    info!("total time {:?}",start_time.elapsed());
    Ok(())
}

fn init_logger(){
    env_logger::builder()
        .format(|buf, record|{
            match record.level() {
                Level::Error => write!(buf,"\x1b[031mError\x1b[0m")?,
                Level::Warn  => write!(buf,"\x1b[033mWarn \x1b[0m")?,
                Level::Info  => write!(buf,"\x1b[032mInfo \x1b[0m")?,
                Level::Debug => write!(buf,"\x1b[034mDebug\x1b[0m")?,
                Level::Trace => write!(buf,"\x1b[035mTrace\x1b[0m")?,
            };
            writeln!(buf,": {}",record.args())
        })
    .init();
}
