use super::{calendar, header_line, version_line};

/// Observation epoch. Each satellite comes with one value per
/// declared observable, None being a blank field.
#[derive(Debug, Clone, Default)]
pub struct ObsEpoch {
    pub t: f64,
    pub flag: u8,
    pub clock_offset: Option<f64>,
    pub svs: Vec<(String, Vec<Option<f64>>)>,
    /// Special records following event flags 2 to 5
    pub special: Vec<String>,
}

impl ObsEpoch {
    pub fn new(t: f64) -> Self {
        Self {
            t,
            ..Default::default()
        }
    }
    pub fn with_flag(mut self, flag: u8) -> Self {
        self.flag = flag;
        self
    }
    pub fn with_clock_offset(mut self, offset: f64) -> Self {
        self.clock_offset = Some(offset);
        self
    }
    /// Adds a satellite, `label` is written as is (3 columns)
    pub fn with_sv(mut self, label: &str, values: &[Option<f64>]) -> Self {
        self.svs.push((label.to_string(), values.to_vec()));
        self
    }
    pub fn with_special(mut self, lines: &[&str]) -> Self {
        self.special = lines.iter().map(|line| line.to_string()).collect();
        self
    }
    pub fn lines(&self) -> Vec<String> {
        let (day, hours, minutes, seconds) = calendar(self.t);
        let count = if self.special.is_empty() {
            self.svs.len()
        } else {
            self.special.len()
        };
        let mut first = format!(
            " {:02} {:>2} {:>2} {:>2} {:>2}{:>11.7}  {}{:>3}",
            22, 3, day, hours, minutes, seconds, self.flag, count
        );
        for (label, _) in self.svs.iter().take(12) {
            first.push_str(label);
        }
        if let Some(offset) = self.clock_offset {
            first = format!("{:<68}{:12.9}", first, offset);
        }
        let mut lines = vec![first];

        let others = self.svs.iter().skip(12).collect::<Vec<_>>();
        for chunk in others.chunks(12) {
            let mut line = " ".repeat(32);
            for (label, _) in chunk {
                line.push_str(label);
            }
            lines.push(line);
        }

        lines.extend(self.special.iter().cloned());

        for (_, values) in self.svs.iter() {
            for chunk in values.chunks(5) {
                let line = chunk
                    .iter()
                    .map(|value| match value {
                        Some(value) => format!("{:14.3}  ", value),
                        None => " ".repeat(16),
                    })
                    .collect::<String>();
                lines.push(line.trim_end().to_string());
            }
        }
        lines
    }
}

/// Observation file description
#[derive(Debug, Clone)]
pub struct ObsFile {
    pub version: String,
    pub system: char,
    pub position: (f64, f64, f64),
    pub types: Vec<String>,
    /// TIME OF FIRST OBS, defaults to the first epoch
    pub first_obs: Option<f64>,
    pub omit_first_obs: bool,
    pub header: Vec<String>,
    pub epochs: Vec<ObsEpoch>,
}

impl ObsFile {
    pub fn new(types: &[&str]) -> Self {
        Self {
            version: "2.11".to_string(),
            system: 'G',
            position: (4027893.678, 307045.601, 4919475.159),
            types: types.iter().map(|code| code.to_string()).collect(),
            first_obs: None,
            omit_first_obs: false,
            header: Vec::new(),
            epochs: Vec::new(),
        }
    }
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }
    pub fn with_system(mut self, system: char) -> Self {
        self.system = system;
        self
    }
    pub fn with_position(mut self, position: (f64, f64, f64)) -> Self {
        self.position = position;
        self
    }
    pub fn with_first_obs(mut self, t: f64) -> Self {
        self.first_obs = Some(t);
        self
    }
    pub fn without_first_obs(mut self) -> Self {
        self.omit_first_obs = true;
        self
    }
    /// Adds a raw header line, right before END OF HEADER
    pub fn with_header(mut self, line: &str) -> Self {
        self.header.push(line.to_string());
        self
    }
    pub fn with_epoch(mut self, epoch: ObsEpoch) -> Self {
        self.epochs.push(epoch);
        self
    }
    pub fn with_epochs(mut self, epochs: &[ObsEpoch]) -> Self {
        self.epochs.extend_from_slice(epochs);
        self
    }
    pub fn content(&self) -> String {
        let mut lines = vec![
            version_line(&self.version, 'O', self.system),
            header_line(
                "rnx                 toolkit             20220306 000000 UTC",
                "PGM / RUN BY / DATE",
            ),
            header_line("TOOLKIT", "MARKER NAME"),
            header_line(
                &format!(
                    "{:14.4}{:14.4}{:14.4}",
                    self.position.0, self.position.1, self.position.2
                ),
                "APPROX POSITION XYZ",
            ),
        ];

        for (n, chunk) in self.types.chunks(9).enumerate() {
            let mut content = if n == 0 {
                format!("{:>6}", self.types.len())
            } else {
                " ".repeat(6)
            };
            for code in chunk {
                content.push_str(&format!("{:>6}", code));
            }
            lines.push(header_line(&content, "# / TYPES OF OBSERV"));
        }

        if !self.omit_first_obs {
            let first = self
                .first_obs
                .or_else(|| self.epochs.first().map(|epoch| epoch.t))
                .unwrap_or(0.0);
            let (day, hours, minutes, seconds) = calendar(first);
            lines.push(header_line(
                &format!(
                    "{:>6}{:>6}{:>6}{:>6}{:>6}{:>13.7}     GPS",
                    2022, 3, day, hours, minutes, seconds
                ),
                "TIME OF FIRST OBS",
            ));
        }

        lines.extend(self.header.iter().cloned());
        lines.push(header_line("", "END OF HEADER"));

        for epoch in self.epochs.iter() {
            lines.extend(epoch.lines());
        }
        lines.join("\n") + "\n"
    }
}

/// GPS observation file content
pub fn observation_file(types: &[&str], epochs: &[ObsEpoch]) -> String {
    ObsFile::new(types).with_epochs(epochs).content()
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn epoch_lines() {
        let epoch = ObsEpoch::new(4000.125)
            .with_clock_offset(0.000123456)
            .with_sv("G01", &[Some(23619095.45), None])
            .with_sv(" 05", &[None, Some(-1.5)]);
        let lines = epoch.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(&lines[0][..38], " 22  3  6  1  6 40.1250000  0  2G01 05");
        assert_eq!(&lines[0][68..], " 0.000123456");
        assert_eq!(lines[1], "  23619095.450");
        assert_eq!(lines[2], format!("{}{:>14}", " ".repeat(16), "-1.500"));
    }
    #[test]
    fn many_satellites() {
        let mut epoch = ObsEpoch::new(0.0);
        for prn in 1..=14 {
            epoch = epoch.with_sv(&format!("G{:02}", prn), &[Some(1.0)]);
        }
        let lines = epoch.lines();
        assert_eq!(lines.len(), 2 + 14);
        assert_eq!(&lines[0][32..35], "G01");
        assert_eq!(&lines[0][65..68], "G12");
        assert_eq!(&lines[1][32..38], "G13G14");
    }
    #[test]
    fn header_types() {
        let types = ["C1", "L1", "L2", "P1", "P2", "D1", "D2", "S1", "S2", "C2"];
        let content = ObsFile::new(&types).content();
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(&lines[4][..12], "    10    C1");
        assert_eq!(lines[4][60..].trim_end(), "# / TYPES OF OBSERV");
        assert_eq!(&lines[5][..12], "          C2");
        assert_eq!(lines[5][60..].trim_end(), "# / TYPES OF OBSERV");
    }
}
