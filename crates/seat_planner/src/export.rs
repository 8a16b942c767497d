use crate::allocate::{AllocationResult, Assignment};
use crate::constants::ASSIGNMENT_HEADERS;
use crate::error::{Result, SeatPlanError};
use chrono::Local;
use csv::WriterBuilder;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// `<prefix>_<timestamp>.<ext>` inside `output_dir` (created if missing),
/// or in the working directory.
fn timestamped_path(prefix: &str, ext: &str, output_dir: Option<&Path>) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let filename = format!("{prefix}_{timestamp}.{ext}");

    match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|e| SeatPlanError::CreateDir {
                path: dir.to_path_buf(),
                source: e,
            })?;
            Ok(dir.join(&filename))
        }
        None => Ok(filename.into()),
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| SeatPlanError::CreateFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(BufWriter::new(file))
}

/// Write one row per assignment, in the given order
pub fn write_assignments_csv<W: Write>(writer: W, assignments: &[Assignment]) -> Result<()> {
    #[allow(unused_mut)]
    let mut builder = WriterBuilder::new();
    #[cfg(windows)]
    {
        use csv::Terminator;
        builder = builder.terminator(Terminator::CRLF);
    }
    let mut wtr = builder.from_writer(writer);

    wtr.write_record(ASSIGNMENT_HEADERS)?;
    for a in assignments {
        let table = a.table_id.map(|t| t.to_string()).unwrap_or_default();
        wtr.write_record([
            a.seat_id.to_string().as_str(),
            a.person_id.to_string().as_str(),
            a.name.as_str(),
            a.role.to_string().as_str(),
            a.gender.to_string().as_str(),
            a.department.as_str(),
            a.team_id.0.as_str(),
            table.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the seat map as `assignments_<timestamp>.csv`
pub fn export_assignments_csv(
    result: &AllocationResult,
    output_dir: Option<&Path>,
) -> Result<PathBuf> {
    let path = timestamped_path("assignments", "csv", output_dir)?;
    write_assignments_csv(create(&path)?, &result.assignments)?;
    Ok(path)
}

/// Save the full run (assignments, summary, team outcomes, warnings, zones)
/// as `report_<timestamp>.json`
pub fn write_report_json(result: &AllocationResult, output_dir: Option<&Path>) -> Result<PathBuf> {
    let path = timestamped_path("report", "json", output_dir)?;
    let mut writer = create(&path)?;
    serde_json::to_writer_pretty(&mut writer, result)?;
    writer.flush()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocate::AllocationSummary;
    use crate::model::{Gender, Person, Role, SeatId, TableId, TeamId};
    use tempfile::TempDir;

    fn sample() -> AllocationResult {
        let mut lee = Person::new(1, "Lee", "Eng", Role::Leader);
        lee.gender = Gender::Female;
        let max = Person::new(2, "Max", "Eng", Role::SubManager);
        AllocationResult {
            assignments: vec![
                Assignment::new(SeatId(3), &lee, &TeamId::new("leader-1"), None),
                Assignment::new(SeatId(10), &max, &TeamId::new("team-2"), Some(TableId(4))),
            ],
            summary: AllocationSummary {
                people_total: 2,
                people_seated: 2,
                ..Default::default()
            },
            teams: Vec::new(),
            warnings: Vec::new(),
            zones: Vec::new(),
        }
    }

    #[test]
    fn test_csv_content_format() {
        let mut buf = Vec::new();
        write_assignments_csv(&mut buf, &sample().assignments).unwrap();
        let content = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "seat_id,person_id,name,role,gender,department,team_id,table_id",
                "3,1,Lee,leader,female,Eng,leader-1,",
                "10,2,Max,sub-manager,unspecified,Eng,team-2,4",
            ]
        );
    }

    #[test]
    fn test_export_to_dir() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("nested");
        let path = export_assignments_csv(&sample(), Some(&out)).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("assignments_"));
        assert!(name.ends_with(".csv"));
        assert!(path.exists());
    }

    #[test]
    fn test_empty_result_writes_header_only() {
        let temp_dir = TempDir::new().unwrap();
        let mut result = sample();
        result.assignments.clear();
        let path = export_assignments_csv(&result, Some(temp_dir.path())).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_report_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_report_json(&sample(), Some(temp_dir.path())).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["summary"]["people_seated"], 2);
        assert_eq!(value["assignments"][1]["table_id"], 4);
        assert_eq!(value["assignments"][0]["team_id"], "leader-1");
    }

    #[test]
    fn test_invalid_output_directory() {
        let result = export_assignments_csv(&sample(), Some(Path::new("/proc/none/out")));
        if let Err(e) = result {
            let msg = e.to_string();
            assert!(
                msg.contains("Failed to create directory") || msg.contains("Failed to create file"),
                "Unexpected error: {e}"
            );
        }
    }
}
