// Integration tests for config-driven smoothing

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;
    use trajectory_timing::input::PathFile;
    use trajectory_timing::{load_config, IterativeSmoother};

    #[test]
    fn test_config_and_path_file_end_to_end() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("smoother.toml");
        let mut file = File::create(&config_path).unwrap();
        writeln!(
            file,
            "[smoother]\nmax_iterations = 500\nmax_time_change_per_iteration = 0.05\n\n[joints.pan]\nmax_velocity = 2.0\nmax_acceleration = 1.0"
        )
        .unwrap();
        file.flush().unwrap();

        let path_path = dir.path().join("path.toml");
        let mut file = File::create(&path_path).unwrap();
        writeln!(
            file,
            "joint_names = [\"pan\", \"tilt\"]\n\n[[waypoints]]\npositions = [0.0, 0.0]\n\n[[waypoints]]\npositions = [1.0, 0.5]\n\n[[waypoints]]\npositions = [0.0, 1.0]"
        )
        .unwrap();
        file.flush().unwrap();

        let config = load_config(config_path.to_str().unwrap()).unwrap();
        let (trajectory, limits) = PathFile::load(&path_path).unwrap().into_parts(&config);
        assert!(limits[0].has_velocity_limits);
        assert!(!limits[1].has_velocity_limits);

        let outcome = IterativeSmoother::new(config.smoother.clone())
            .smooth(&trajectory, &limits)
            .unwrap();
        assert!(outcome.converged());
        assert_eq!(outcome.trajectory.len(), 3);
        // pan moves 1.0 at 2.0 rad/s but tilt is held to the 1.0 default
        assert!(outcome.intervals[0] >= 0.5);
    }
}
