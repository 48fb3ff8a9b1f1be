#[cfg(test)]
mod test {
    use crate::mapping::map_ephemerides;
    use crate::prelude::*;
    use crate::tests::toolkit::{navigation_file, observation_file, NavRecord, ObsEpoch, ObsFile};
    use std::io::BufReader;

    fn navigation(records: &[NavRecord]) -> Navigation {
        let content = navigation_file(records);
        Navigation::from_reader(&mut BufReader::new(content.as_bytes())).unwrap()
    }

    fn observation(content: &str) -> Observation {
        Observation::from_reader(&mut BufReader::new(content.as_bytes())).unwrap()
    }

    /// Single satellite observed at each `t`
    fn observed(label: &str, t: &[f64]) -> Observation {
        let epochs = t
            .iter()
            .map(|t| ObsEpoch::new(*t).with_sv(label, &[Some(20000000.0)]))
            .collect::<Vec<_>>();
        observation(&observation_file(&["C1"], &epochs))
    }

    #[test]
    fn outside_fit_interval() {
        // beyond the 1 hour slack as well
        let nav = navigation(&[NavRecord::new(7, 0.0).with_fit_hours(2.0)]);
        let mut obs = observed("G07", &[4000.0]);
        let warnings = obs.attach_ephemerides(&nav);
        assert_eq!(warnings, vec![Warning::NoTimeOverlap]);
        let ephs = obs.ephs.as_ref().unwrap();
        assert_eq!(ephs.shape(), (1, 1));
        assert!(ephs[(0, 0)].is_none());

        // within the slack, outside the fit interval
        let nav = navigation(&[NavRecord::new(7, 0.0).with_fit_hours(1.0)]);
        let mut obs = observed("G07", &[2000.0]);
        assert!(obs.attach_ephemerides(&nav).is_empty());
        assert!(obs.ephemeris(0, 0).is_none());
    }

    #[test]
    fn nearest_ephemeris() {
        let nav = navigation(&[
            NavRecord::new(7, 0.0).with_fit_hours(2.0).with_m_0(1.0),
            NavRecord::new(7, 1800.0).with_fit_hours(2.0).with_m_0(2.0),
        ]);
        let mut obs = observed("G07", &[1000.0]);
        obs.attach_ephemerides(&nav);
        let eph = obs.ephemeris(0, 0).unwrap();
        assert_eq!(eph.t_oc, 1800.0);
        assert_eq!(eph.m_0, 2.0);
    }

    #[test]
    fn equally_distant() {
        // later ephemeris wins
        let nav = navigation(&[
            NavRecord::new(7, 0.0).with_fit_hours(2.0),
            NavRecord::new(7, 1800.0).with_fit_hours(2.0),
        ]);
        let mut obs = observed("G07", &[900.0]);
        obs.attach_ephemerides(&nav);
        assert_eq!(obs.ephemeris(0, 0).unwrap().t_oc, 1800.0);
    }

    #[test]
    fn window_bounds() {
        let nav = navigation(&[NavRecord::new(7, 7200.0).with_fit_hours(2.0)]);
        let mut obs = observed("G07", &[3599.0, 3600.0, 7200.0, 10800.0, 10801.0]);
        obs.attach_ephemerides(&nav);
        let mapped = (0..obs.len())
            .map(|k| obs.ephemeris(k, 0).is_some())
            .collect::<Vec<_>>();
        assert_eq!(mapped, vec![false, true, true, true, false]);
    }

    #[test]
    fn shared_records() {
        let nav = navigation(&[NavRecord::new(7, 0.0)]);
        let mut obs = observed("G07", &[0.0, 30.0, 60.0]);
        obs.attach_ephemerides(&nav);
        let ephs = obs.ephs.as_ref().unwrap();
        let source = nav.ephs[(0, 0)].as_ref().unwrap();
        for k in 0..3 {
            let eph = ephs[(k, 0)].as_ref().unwrap();
            assert!(std::sync::Arc::ptr_eq(eph, source));
        }
    }

    #[test]
    fn gps_only() {
        let nav = navigation(&[NavRecord::new(7, 0.0), NavRecord::new(9, 0.0)]);
        let content = ObsFile::new(&["C1"])
            .with_system('M')
            .with_epoch(
                ObsEpoch::new(60.0)
                    .with_sv("G07", &[Some(1.0)])
                    .with_sv("R07", &[Some(2.0)])
                    .with_sv("G08", &[Some(3.0)]),
            )
            .content();
        let mut obs = observation(&content);
        let warnings = obs.attach_ephemerides(&nav);
        assert!(warnings.is_empty());
        assert_eq!(obs.svs, vec!["G07", "G08", "R07"]);
        assert!(obs.ephemeris(0, 0).is_some());
        assert!(obs.ephemeris(0, 1).is_none(), "no record for G08");
        assert!(obs.ephemeris(0, 2).is_none(), "R07 is not a GPS satellite");
    }

    #[test]
    fn different_weeks() {
        // navigation starts on saturday, observations on sunday
        let nav = navigation(&[NavRecord::new(7, -3600.0)]);
        assert_eq!(nav.t_oc, vec![604800.0 - 3600.0]);
        let mut obs = observed("G07", &[0.0]);
        assert_ne!(nav.ts_bow, obs.ts_bow);
        let warnings = obs.attach_ephemerides(&nav);
        assert!(warnings.is_empty());
        assert!(obs.ephemeris(0, 0).is_some());
    }

    #[test]
    fn no_time_overlap() {
        let nav = navigation(&[NavRecord::new(7, 0.0)]);
        let mut obs = observed("G07", &[3601.0 + 14400.0, 86400.0]);
        let warnings = obs.attach_ephemerides(&nav);
        assert_eq!(warnings, vec![Warning::NoTimeOverlap]);
        let ephs = obs.ephs.as_ref().unwrap();
        assert_eq!(ephs.shape(), (2, 1));
        assert!(ephs.iter().all(|eph| eph.is_none()));
    }

    #[test]
    fn overlap_slack() {
        // 1 hour slack: ranges are considered overlapping,
        // although no observation is within the fit interval
        let nav = navigation(&[NavRecord::new(7, 0.0).with_fit_hours(1.0)]);
        let mut obs = observed("G07", &[3600.0]);
        let mapping = map_ephemerides(&nav, &obs);
        assert!(mapping.warnings.is_empty());
        assert_eq!(mapping.mapped(), 0);
        assert!(obs.attach_ephemerides(&nav).is_empty());
    }

    #[test]
    fn empty_navigation() {
        let nav = navigation(&[]);
        let mut obs = observed("G07", &[0.0]);
        let warnings = obs.attach_ephemerides(&nav);
        assert_eq!(warnings, vec![Warning::NoTimeOverlap]);
    }

    #[test]
    fn no_prn_overlap() {
        let nav = navigation(&[NavRecord::new(3, 0.0)]);
        let mut obs = observed("G05", &[0.0]);
        let warnings = obs.attach_ephemerides(&nav);
        assert_eq!(warnings, vec![Warning::NoPrnOverlap]);
        assert_eq!(
            warnings[0].to_string(),
            "navigation and observation PRNs do not overlap"
        );
        assert!(obs.ephemeris(0, 0).is_none());
        assert_eq!(obs.ephs.as_ref().unwrap().shape(), (1, 1));
    }
}
