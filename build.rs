use std::collections::HashSet;
use std::path::Path;

fn main() {
    let directory_path = Path::new("catalogs/hospitals.json");
    validate_directory_file(directory_path);
    set_build_dependencies();
}

fn validate_directory_file(directory_path: &Path) {
    assert!(
        directory_path.exists(),
        "\n\nHOSPITAL DIRECTORY BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the hospital directory before building.\n",
        directory_path.display()
    );

    let contents = std::fs::read_to_string(directory_path).unwrap_or_else(|e| {
        panic!(
            "\n\nHOSPITAL DIRECTORY BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            directory_path.display()
        );
    });

    let directory: serde_json::Value = serde_json::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\nHOSPITAL DIRECTORY BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            directory_path.display()
        );
    });

    validate_directory_structure(&directory);
}

fn validate_directory_structure(directory: &serde_json::Value) {
    assert!(
        directory.is_object(),
        "\n\nHOSPITAL DIRECTORY BUILD ERROR: Root must be a JSON object\n\
         Got: {directory}\n"
    );

    let hospitals = directory.get("hospitals").unwrap_or_else(|| {
        panic!(
            "\n\nHOSPITAL DIRECTORY BUILD ERROR: Missing 'hospitals' field\n\
             The directory must have a top-level 'hospitals' array.\n"
        );
    });

    let entries = hospitals.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nHOSPITAL DIRECTORY BUILD ERROR: 'hospitals' must be an array\n\
             Got: {hospitals}\n"
        );
    });

    validate_hospitals(entries);

    println!(
        "cargo:warning=Validated hospital directory: {} hospitals",
        entries.len()
    );
}

fn validate_hospitals(entries: &[serde_json::Value]) {
    let mut seen = HashSet::new();

    for (i, hospital) in entries.iter().enumerate() {
        let id = hospital
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or("<unknown>");

        for field in ["id", "name", "city", "contact"] {
            let value = hospital.get(field).and_then(|v| v.as_str());
            assert!(
                value.is_some_and(|s| !s.trim().is_empty()),
                "\n\nHOSPITAL DIRECTORY BUILD ERROR: Hospital '{id}' (index {i}) missing or empty '{field}' field\n"
            );
        }

        assert!(
            seen.insert(id.to_string()),
            "\n\nHOSPITAL DIRECTORY BUILD ERROR: Duplicate hospital id '{id}' (index {i})\n"
        );
    }
}

fn set_build_dependencies() {
    println!("cargo:rerun-if-changed=catalogs/hospitals.json");
    println!("cargo:rerun-if-changed=build.rs");
}
