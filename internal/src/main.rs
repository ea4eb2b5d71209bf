use std::fs;
use std::path::Path;
use std::process::exit;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let Some(instance_path) = args.get(1) else {
        println!("Usage: {} <instance_file>", args[0]);
        exit(1)
    };

    let input_data = match fs::read_to_string(instance_path) {
        Ok(content) => content,
        Err(error) => {
            println!("Error reading {}: {}", instance_path, error);
            exit(1)
        }
    };
    let input_data: serde_json::Value = match serde_json::from_str(&input_data) {
        Ok(value) => value,
        Err(error) => {
            println!("Error parsing {}: {}", instance_path, error);
            exit(1)
        }
    };

    println!("\n---------- RUN: {} ----------", instance_path);
    let output = match internal::run(input_data) {
        Ok(output) => output,
        Err(error) => {
            println!("Error: {}", error);
            exit(1)
        }
    };

    let output_path = output_path_for(instance_path);
    if let Some(parent_dir) = Path::new(&output_path).parent() {
        fs::create_dir_all(parent_dir).expect("Error creating output directory");
    }
    let file = fs::File::create(&output_path).expect("Error creating file");
    serde_json::to_writer_pretty(file, &output).expect("Error writing JSON");
    println!("Plans written to {}", output_path);
}

fn output_path_for(instance_path: &str) -> String {
    let file_name = Path::new(instance_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("instance.json");
    format!("output/plans_{}", file_name)
}
