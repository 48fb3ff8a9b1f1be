//! File type detection and multi file loading
use std::path::{Path, PathBuf};

#[cfg(feature = "log")]
use log::{debug, info};

use crate::{
    error::{Error, ParsingError, UsageError},
    header::sniff_type,
    mapping::Warning,
    navigation::Navigation,
    observation::Observation,
    reader::{BufferedReader, Lines},
    types::Type,
};

/// Identifies the file type from its first line.
pub fn file_type(path: impl AsRef<Path>) -> Result<Type, Error> {
    let mut reader = BufferedReader::new(path)?;
    match Lines::new(&mut reader).next() {
        Some(line) => {
            let line = line?;
            sniff_type(&line).map_err(|e| line.error(e))
        },
        None => Err(Error::Format {
            line: 0,
            label: String::new(),
            source: ParsingError::MissingVersionLine,
        }),
    }
}

/// Role of each file, in the order they were given
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Role {
    Navigation,
    Observation,
    Reference,
}

/// One parsed file
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Product<'a> {
    Navigation(&'a Navigation),
    Observation(&'a Observation),
    /// Reference station observations
    Reference(&'a Observation),
}

/// [Dataset] gathers the parsed files, once cross referenced.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    navigation: Option<Navigation>,
    observation: Option<Observation>,
    reference: Option<Observation>,
    order: Vec<Role>,
    warnings: Vec<Warning>,
}

impl Dataset {
    pub fn navigation(&self) -> Option<&Navigation> {
        self.navigation.as_ref()
    }
    /// Observations, with ephemerides mapped and reference alignment
    /// when the related files were provided.
    pub fn observation(&self) -> Option<&Observation> {
        self.observation.as_ref()
    }
    pub fn reference(&self) -> Option<&Observation> {
        self.reference.as_ref()
    }
    /// Data quality [Warning]s raised while cross referencing
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
    /// Parsed files, in the order they were given
    pub fn products(&self) -> Vec<Product<'_>> {
        self.order
            .iter()
            .filter_map(|role| match role {
                Role::Navigation => self.navigation.as_ref().map(Product::Navigation),
                Role::Observation => self.observation.as_ref().map(Product::Observation),
                Role::Reference => self.reference.as_ref().map(Product::Reference),
            })
            .collect()
    }
    /// Decomposes into (navigation, observation, reference)
    pub fn into_parts(self) -> (Option<Navigation>, Option<Observation>, Option<Observation>) {
        (self.navigation, self.observation, self.reference)
    }
}

/// [Loader] reads one or two files (navigation and/or observation) and
/// an optional reference station observation file.
/// ```
/// use rnx::prelude::*;
/// let dataset = Loader::new("test_resources/NAV/V2/demo0650.22n")
///     .with("test_resources/OBS/V2/demo0650.22o")
///     .load()
///     .unwrap();
/// let obs = dataset.observation()
///     .unwrap();
/// assert!(obs.ephs.is_some());
/// assert!(dataset.warnings().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Loader {
    first: PathBuf,
    second: Option<PathBuf>,
    reference: Option<PathBuf>,
}

impl Loader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            first: path.as_ref().to_path_buf(),
            second: None,
            reference: None,
        }
    }
    /// Adds the complementary file: observations if first file is
    /// a navigation file, navigation otherwise.
    pub fn with(mut self, path: impl AsRef<Path>) -> Self {
        self.second = Some(path.as_ref().to_path_buf());
        self
    }
    /// Adds a reference station observation file.
    pub fn with_reference(mut self, path: impl AsRef<Path>) -> Self {
        self.reference = Some(path.as_ref().to_path_buf());
        self
    }
    /// Verifies the file combination before any parsing
    fn roles(&self) -> Result<Vec<(Role, &Path)>, Error> {
        let mut roles = Vec::with_capacity(3);
        let first = file_type(&self.first)?;
        roles.push((Self::role(first), self.first.as_path()));

        if let Some(second) = &self.second {
            let second_type = file_type(second)?;
            match (first, second_type) {
                (Type::NavigationData, Type::NavigationData) => {
                    return Err(UsageError::TwoNavigationFiles.into());
                },
                (Type::ObservationData, Type::ObservationData) => {
                    return Err(UsageError::TwoObservationFiles.into());
                },
                _ => roles.push((Self::role(second_type), second.as_path())),
            }
        }

        if let Some(reference) = &self.reference {
            if file_type(reference)? != Type::ObservationData {
                return Err(UsageError::ReferenceNotObservation.into());
            }
            if !roles.iter().any(|(role, _)| *role == Role::Observation) {
                return Err(UsageError::ReferenceWithoutObservation.into());
            }
            roles.push((Role::Reference, reference.as_path()));
        }
        Ok(roles)
    }
    fn role(t: Type) -> Role {
        match t {
            Type::NavigationData => Role::Navigation,
            Type::ObservationData => Role::Observation,
        }
    }
    /// Parses all files, maps ephemerides onto observations
    /// and aligns observations on the reference station.
    pub fn load(self) -> Result<Dataset, Error> {
        let mut dataset = Dataset::default();
        for (role, path) in self.roles()? {
            #[cfg(feature = "log")]
            debug!("loading {:?} as {:?}", path, role);
            match role {
                Role::Navigation => dataset.navigation = Some(Navigation::from_file(path)?),
                Role::Observation => dataset.observation = Some(Observation::from_file(path)?),
                Role::Reference => dataset.reference = Some(Observation::from_file(path)?),
            }
            dataset.order.push(role);
        }

        if let Some(obs) = dataset.observation.as_mut() {
            if let Some(nav) = &dataset.navigation {
                dataset.warnings = obs.attach_ephemerides(nav);
            }
            if let Some(reference) = &dataset.reference {
                obs.align_with(reference);
            }
        }

        #[cfg(feature = "log")]
        info!(
            "loaded {} file(s), {} warning(s)",
            dataset.order.len(),
            dataset.warnings.len()
        );
        Ok(dataset)
    }
}

/// Reads a single navigation or observation file.
pub fn read(path: impl AsRef<Path>) -> Result<Dataset, Error> {
    Loader::new(path).load()
}
