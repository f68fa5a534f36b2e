use std::{
    env::args,
    fs::{self, File},
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

mod data;
mod flow;
mod model;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> anyhow::Result<()> {
    let (network, out_path) = match args().nth(1) {
        Some(network_file) => {
            let network =
                serde_json::from_slice::<data::Data>(&fs::read(&network_file)?)?.network;
            let out_path = Path::new(&network_file).with_extension("lp");
            (network, out_path)
        }
        None => (data::Network::default(), PathBuf::from("out.lp")),
    };
    println!("Network {}", network.name);
    println!(
        "  {} sources, {} transit nodes, {} destinations, load balanced over {} paths",
        network.source, network.transit, network.dest, network.paths,
    );

    let dims = flow::Dims {
        source: network.source,
        transit: network.transit,
        dest: network.dest,
    };
    let model = flow::build(dims, network.paths)?;
    println!(
        "  {} constraints, {} bounds, {} binaries",
        model.constr_count(),
        model.bound_count(),
        model.binary_count(),
    );

    println!("Write model file");
    let mut model_file = BufWriter::new(File::create(out_path)?);
    write!(&mut model_file, "{model}")?;
    model_file.flush()?;
    Ok(())
}
