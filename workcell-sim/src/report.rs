//! Console report rendering
//!
//! Each block is a `Display` wrapper so callers decide where it goes.

use core::fmt;

use chrono::NaiveDateTime;
use workcell_core::config::WorkcellConfig;
use workcell_core::{Device, Protocol, ProtocolLog, RunReport};

const RULE_WIDTH: usize = 70;

/// Horizontal rule
struct Rule(char);

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..RULE_WIDTH {
            write!(f, "{}", self.0)?;
        }
        Ok(())
    }
}

/// Banner printed before a run starts
pub struct Header<'a> {
    pub workcell: &'a str,
    pub protocol: &'a Protocol,
    pub started: NaiveDateTime,
}

impl fmt::Display for Header<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Rule('='))?;
        writeln!(f, "{}", self.protocol.label.to_uppercase())?;
        writeln!(f, "  Workcell:   {}", self.workcell)?;
        writeln!(f, "  Steps:      {}", self.protocol.len())?;
        writeln!(f, "  Start time: {}", self.started.format("%Y-%m-%d %H:%M:%S"))?;
        write!(f, "{}", Rule('='))
    }
}

/// Transfer log table
pub struct LogTable<'a>(pub &'a ProtocolLog);

impl fmt::Display for LogTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TRANSFER LOG")?;
        writeln!(f, "{}", Rule('-'))?;
        if self.0.is_empty() {
            return write!(f, "(no transfers)");
        }

        write!(
            f,
            "{:<10}{:<26}{:<16}{:<16}OUTCOME",
            "TIME", "PLATE", "FROM", "TO"
        )?;
        for entry in self.0.iter() {
            write!(
                f,
                "\n{:<10}{:<26}{:<16}{:<16}{}",
                entry.timestamp.format("%H:%M:%S").to_string(),
                entry.plate.as_str(),
                entry.source,
                entry.destination,
                entry.outcome
            )?;
            if let Some(error) = &entry.error {
                write!(f, ": {error}")?;
            }
        }
        Ok(())
    }
}

/// Final device status table
pub struct DeviceTable<'a>(pub Vec<&'a Device>);

impl<'a> DeviceTable<'a> {
    /// Collect devices in display order
    pub fn new(devices: impl IntoIterator<Item = &'a Device>) -> Self {
        Self(devices.into_iter().collect())
    }
}

impl fmt::Display for DeviceTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DEVICE STATUS")?;
        writeln!(f, "{}", Rule('-'))?;
        write!(f, "{:<16}{:<12}PLATE", "DEVICE", "STATE")?;
        for device in &self.0 {
            let plate = device.plate().map_or("empty", |p| p.as_str());
            write!(
                f,
                "\n{:<16}{:<12}{}",
                device.name(),
                device.state().as_str(),
                plate
            )?;
        }
        Ok(())
    }
}

/// Run summary
pub struct Summary<'a>(pub &'a RunReport);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let secs = report.duration().num_milliseconds() as f64 / 1000.0;

        writeln!(f, "RUN SUMMARY")?;
        writeln!(f, "{}", Rule('-'))?;
        writeln!(f, "Protocol:       {}", report.protocol)?;
        writeln!(f, "Duration:       {secs:.1}s")?;
        writeln!(f, "Robot moves:    {}", report.moves)?;
        writeln!(
            f,
            "Transfers:      {} ({} succeeded, {} failed)",
            report.summary.total, report.summary.succeeded, report.summary.failed
        )?;
        writeln!(f, "Success rate:   {:.1}%", report.summary.success_rate_pct())?;
        write!(f, "Est. distance:  ~{}mm", report.estimated_distance_mm)
    }
}

/// Configured layout, before any run
pub struct Layout<'a>(pub &'a WorkcellConfig);

impl fmt::Display for Layout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.0;
        let home = config.robot.home;

        writeln!(f, "{}", config.name)?;
        writeln!(f, "{}", Rule('-'))?;
        writeln!(
            f,
            "Robot: {} at ({}, {}, {}), {} mm/s",
            config.robot.name, home.x, home.y, home.z, config.robot.speed_mm_s
        )?;
        write!(f, "{:<16}{:<24}PLATE", "DEVICE", "POSITION")?;
        for device in &config.devices {
            let plate = config
                .plates
                .iter()
                .find(|p| p.device == device.name)
                .map_or("empty", |p| p.id.as_str());
            let position = format!("({}, {}, {})", device.x, device.y, device.z);
            write!(f, "\n{:<16}{:<24}{}", device.name, position, plate)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};
    use workcell_core::{LogSummary, PlateId, SpatialPosition};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 14)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .unwrap()
    }

    #[test]
    fn test_rule_width() {
        assert_eq!(Rule('=').to_string().chars().count(), RULE_WIDTH);
    }

    #[test]
    fn test_empty_log() {
        let log = ProtocolLog::new();
        assert!(LogTable(&log).to_string().ends_with("(no transfers)"));
    }

    #[test]
    fn test_device_table_shows_empty() {
        let mut storage = Device::new(
            "Storage",
            SpatialPosition::new(100.0, 200.0, 50.0, "Storage"),
        );
        storage.load(PlateId::new("P1")).unwrap();
        let handler = Device::new(
            "LiquidHandler",
            SpatialPosition::new(400.0, 200.0, 100.0, "LiquidHandler"),
        );

        let text = DeviceTable::new([&storage, &handler]).to_string();
        let rows: Vec<&str> = text.lines().skip(3).collect();
        assert_eq!(rows[0].split_whitespace().collect::<Vec<_>>(), ["Storage", "loaded", "P1"]);
        assert_eq!(
            rows[1].split_whitespace().collect::<Vec<_>>(),
            ["LiquidHandler", "idle", "empty"]
        );
    }

    #[test]
    fn test_summary_formatting() {
        let report = RunReport {
            protocol: "Mini".into(),
            started: at(9, 30, 0),
            finished: at(9, 30, 0) + TimeDelta::milliseconds(12_340),
            steps: Vec::new(),
            moves: 3,
            estimated_distance_mm: 1200,
            summary: LogSummary {
                total: 3,
                succeeded: 2,
                failed: 1,
            },
        };

        let text = Summary(&report).to_string();
        assert!(text.contains("Duration:       12.3s"));
        assert!(text.contains("Transfers:      3 (2 succeeded, 1 failed)"));
        assert!(text.contains("Success rate:   66.7%"));
        assert!(text.contains("Est. distance:  ~1200mm"));
    }

    #[test]
    fn test_layout_lists_devices_in_order() {
        let text = Layout(&WorkcellConfig::reference()).to_string();
        let names: Vec<&str> = text
            .lines()
            .skip(4)
            .filter_map(|l| l.split_whitespace().next())
            .collect();
        assert_eq!(
            names,
            ["Storage", "LiquidHandler", "ThermalCycler", "PlateReader", "Centrifuge"]
        );
        assert!(text.contains("CELL_CULTURE_PLATE_001"));
        assert!(text.contains("(1000, 200, 90)"));
    }
}
