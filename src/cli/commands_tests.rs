use super::*;
use std::io::Write;
use tempfile::TempDir;

// =========================================================================
// format_number Tests
// =========================================================================

#[test]
fn test_format_number_integer() {
    assert_eq!(format_number(100.0), "100");
    assert_eq!(format_number(0.0), "0");
}

#[test]
fn test_format_number_decimal() {
    assert_eq!(format_number(0.75), "0.75");
    assert_eq!(format_number(1.10), "1.1");
}

#[test]
fn test_format_number_precision() {
    assert_eq!(format_number(0.123456), "0.1235");
    assert_eq!(format_number(2.00001), "2");
}

// =========================================================================
// Command Tests
// =========================================================================

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn fixtures(dir: &TempDir) -> (PathBuf, PathBuf) {
    let bom = write_file(
        dir,
        "bom.csv",
        "Lvl,U/M,Quantity,Component no,Description\n\
         1,pcs,2,A,Frame\n\
         2,kg,1.5,B,Steel\n",
    );
    let master = write_file(
        dir,
        "master.csv",
        "Item no,Net weight,EPD Material\n\
         A,3,\n\
         B,0,EPD-X\n",
    );
    (bom, master)
}

#[test]
fn test_load_config_defaults_without_path() {
    assert_eq!(load_config(None).unwrap(), Config::default());
}

#[test]
fn test_load_inputs() {
    let dir = TempDir::new().unwrap();
    let (bom, master) = fixtures(&dir);
    let (rows, lookup) = load_inputs(&bom, &master, &Config::default()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(lookup.len(), 2);
    assert_eq!(lookup.epd("B"), "EPD-X");
}

#[test]
fn test_load_inputs_missing_column_is_terminal() {
    let dir = TempDir::new().unwrap();
    let (bom, _) = fixtures(&dir);
    let master = write_file(&dir, "bad.csv", "Item no,Weight\nA,3\n");
    let result = load_inputs(&bom, &master, &Config::default());
    assert!(matches!(result, Err(BomError::MissingColumn { .. })));
}

#[test]
fn test_allocate_writes_output() {
    let dir = TempDir::new().unwrap();
    let (bom, master) = fixtures(&dir);
    let output = dir.path().join("out.csv");

    allocate(bom, master, output.clone(), None, true).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("EPD-X,6.0,Frame,0.13,Steel"));
}

#[test]
fn test_allocate_with_role_column_config() {
    let dir = TempDir::new().unwrap();
    let (_, master) = fixtures(&dir);
    let bom = write_file(
        &dir,
        "bom_roles.csv",
        "Lvl,U/M,Quantity,Component no,Description,Description 7\n\
         1,pcs,2,A,Frame,single\n\
         2,kg,1.5,B,Steel,skip\n\
         2,pcs,3,A,Bolt,paired\n\
         3,kg,1.2,B,Zinc,skip\n\
         2,pcs,1,A,Nut,whatever\n",
    );
    let config = write_file(&dir, "config.yaml", "bom:\n  columns:\n    role: Description 7\n");
    let output = dir.path().join("out.csv");

    allocate(bom, master, output.clone(), Some(config), false).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "EPDName,EPDQuantity,Comments,UnitCalc,Material Name",
            // Labelled single row
            ",6.0,Frame,,",
            // Labelled skip row visited alone: owner found positionally,
            // fraction = raw quantity / owner weight
            "EPD-X,6.0,Frame,0.25,Steel",
            // Labelled pair consumes the skip row after it
            "EPD-X,9.0,Bolt,0.07,Zinc",
        ]
    );
}

#[test]
fn test_classify_runs() {
    let dir = TempDir::new().unwrap();
    let (bom, master) = fixtures(&dir);
    assert!(classify(bom, master, None).is_ok());
}

#[test]
fn test_init_config_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bom-epd.yaml");

    init_config(path.clone(), false).unwrap();
    let written = Config::load(&path).unwrap();
    assert_eq!(written, Config::default());

    assert!(matches!(
        init_config(path.clone(), false),
        Err(BomError::Config(_))
    ));
    assert!(init_config(path, true).is_ok());
}
