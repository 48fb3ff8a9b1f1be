use super::{calendar, d19, header_line, version_line};

/// Navigation record. `orbits` holds the raw values of the 7 orbit lines,
/// the last line only uses its first two fields (transmission time,
/// fit interval in hours).
#[derive(Debug, Clone)]
pub struct NavRecord {
    pub prn: u8,
    pub t_oc: f64,
    pub clock: [f64; 3],
    pub orbits: [[f64; 4]; 7],
}

impl NavRecord {
    /// Record with all fields null, fit interval included
    pub fn new(prn: u8, t_oc: f64) -> Self {
        Self {
            prn,
            t_oc,
            clock: [0.0; 3],
            orbits: [[0.0; 4]; 7],
        }
    }
    pub fn with_fit_hours(mut self, hours: f64) -> Self {
        self.orbits[6][1] = hours;
        self
    }
    /// Mean anomaly, last field of the first orbit line
    pub fn with_m_0(mut self, m_0: f64) -> Self {
        self.orbits[0][3] = m_0;
        self
    }
    pub fn with_clock(mut self, a_f0: f64, a_f1: f64, a_f2: f64) -> Self {
        self.clock = [a_f0, a_f1, a_f2];
        self
    }
    pub fn lines(&self) -> Vec<String> {
        let (day, hours, minutes, seconds) = calendar(self.t_oc);
        let mut first = format!(
            "{:>2} {:02} {:>2} {:>2} {:>2} {:>2}{:>5.1}",
            self.prn, 22, 3, day, hours, minutes, seconds
        );
        for value in self.clock {
            first.push_str(&d19(value));
        }
        let mut lines = vec![first];
        for (n, orbit) in self.orbits.iter().enumerate() {
            let fields = if n == 6 { 2 } else { 4 };
            let mut line = String::from("   ");
            for value in orbit.iter().take(fields) {
                line.push_str(&d19(*value));
            }
            lines.push(line);
        }
        lines
    }
}

/// Complete navigation file content
pub fn navigation_file(records: &[NavRecord]) -> String {
    let mut lines = vec![
        format!("{:>9}{:11}{:<40}{}", "2.11", "", "N: GPS NAV DATA", "RINEX VERSION / TYPE"),
        header_line("rnx                 toolkit             20220306 000000 UTC", "PGM / RUN BY / DATE"),
        header_line("    0.1118D-07  0.0000D+00 -0.5960D-07  0.0000D+00", "ION ALPHA"),
        header_line("    18", "LEAP SECONDS"),
        header_line("", "END OF HEADER"),
    ];
    for record in records {
        lines.extend(record.lines());
    }
    lines.join("\n") + "\n"
}

/// Navigation file content with a custom first line
pub fn navigation_file_with(version: &str, letter: char, records: &[NavRecord]) -> String {
    let content = navigation_file(records);
    let (_, body) = content.split_once('\n').unwrap();
    format!("{}\n{}", version_line(version, letter, ' '), body)
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn record_lines() {
        let record = NavRecord::new(3, 4030.5).with_fit_hours(4.0);
        let lines = record.lines();
        assert_eq!(lines.len(), 8);
        assert_eq!(&lines[0][..22], " 3 22  3  6  1  7 10.5");
        assert_eq!(lines[0].len(), 22 + 3 * 19);
        assert_eq!(lines[1].len(), 3 + 4 * 19);
        assert_eq!(lines[7].len(), 3 + 2 * 19);
        assert_eq!(&lines[7][22..41], " 4.000000000000D+00");
    }
}
