use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use titanium_proto::{allocation_hint, compile, decode_to_json, Instance, Layout, ProtoError};

#[derive(Parser)]
#[command(name = "tiproto")]
#[command(about = "Validate titanium-proto schemas, encode and decode instances", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a schema document and print its layout metrics
    Check {
        /// Input schema `.json` file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Encode a JSON instance to the binary wire format
    Encode {
        /// Schema `.json` file
        #[arg(short, long)]
        schema: PathBuf,

        /// JSON instance file
        #[arg(short, long)]
        input: PathBuf,

        /// Output `.bin` file (defaults to the instance name + `.bin`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode a binary instance back to JSON (printed to stdout)
    Decode {
        /// Schema `.json` file
        #[arg(short, long)]
        schema: PathBuf,

        /// Input `.bin` file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<(), ProtoError> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Check { input } => {
            let text = fs::read_to_string(input).map_err(ProtoError::Io)?;
            let schema = compile(&text)?;
            let layout = Layout::compute(&schema);

            println!("package: {}", schema.package_name());
            for field in schema.fields() {
                if field.is_variable_capacity() {
                    println!("  {}: {} (capacity {})", field.name(), field.kind().token(), field.capacity());
                } else {
                    println!("  {}: {} ({} bytes)", field.name(), field.kind().token(), field.declared_size());
                }
            }
            println!("minimum size:         {}", layout.minimum_size());
            println!("maximum dynamic size: {}", layout.maximum_dynamic_size());
            println!("static maximum size:  {}", layout.static_maximum_size());
            println!("allocation hint:      {}", allocation_hint(&schema));
            Ok(())
        }

        Commands::Encode {
            schema,
            input,
            output,
        } => {
            let schema_text = fs::read_to_string(schema).map_err(ProtoError::Io)?;
            let schema = compile(&schema_text)?;

            let instance_text = fs::read_to_string(input).map_err(ProtoError::Io)?;
            let mut instance = Instance::new(&schema);
            instance.decode_json(&instance_text)?;

            let mut buffer = vec![0u8; allocation_hint(&schema)];
            let written = instance.encode(&mut buffer)?;

            let out_path = if let Some(o) = output {
                o.clone()
            } else {
                let mut p = input.clone();
                p.set_extension("bin");
                p
            };
            fs::write(&out_path, &buffer[..written]).map_err(ProtoError::Io)?;
            println!("Encoded {} → {} ({} bytes)", input.display(), out_path.display(), written);
            Ok(())
        }

        Commands::Decode { schema, input } => {
            let schema_text = fs::read_to_string(schema).map_err(ProtoError::Io)?;
            let schema = compile(&schema_text)?;

            let data = fs::read(input).map_err(ProtoError::Io)?;
            let json = decode_to_json(&schema, &data)?;
            println!("{}", json);
            Ok(())
        }
    }
}
