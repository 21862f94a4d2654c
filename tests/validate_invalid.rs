//! Integration test for validating a malformed model.
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;
use yapos::cli::handle_validate_command;
use yapos::settings::Settings;

/// Get the path to the example model.
fn get_model_dir() -> PathBuf {
    PathBuf::from("demos/simple")
}

/// Validation fails if a unit is connected to a zone which doesn't exist
#[test]
fn test_handle_validate_command_bad_bus() {
    unsafe { std::env::set_var("YAPOS_LOG_LEVEL", "off") };

    let dir = tempdir().unwrap();
    for entry in fs::read_dir(get_model_dir()).unwrap() {
        let path = entry.unwrap().path();
        fs::copy(&path, dir.path().join(path.file_name().unwrap())).unwrap();
    }
    fs::write(
        dir.path().join("gen.csv"),
        "unit,bus,cost,min,max,stomax\ncoal_north,0,30,10,120,0\ngas_south,5,60,0,80,0\n\
        hydro_south,1,2,0,100,600\n",
    )
    .unwrap();

    let err = handle_validate_command(dir.path(), Some(Settings::default())).unwrap_err();
    assert!(err.to_string().ends_with("is invalid"));
    assert!(
        err.chain()
            .any(|cause| cause.to_string()
                == "Unit gas_south is connected to zone 5, but there are only 2 zones")
    );
}
