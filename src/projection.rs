use crate::{CameraConfig, FovMode, MountOffset, RawSample, Scan};

/// A LiDAR reading transformed into the camera frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Camera-centred angle, readings left of the forward axis are negative
    pub angle_key: f32,
    /// Distance along the camera's forward axis, corrected for the longitudinal offset
    pub depth_mm: f32,
    /// Angle as reported by the sensor, before wrapping
    pub sensor_angle_deg: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanishingPoint {
    pub x: f32,
    pub angle_key: f32,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProjectionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No reading with a return lies within the {fov_deg} deg field of view")]
    EmptyResult { fov_deg: f32 },
    #[error("Maximum depth is {max_depth} mm, depth can't be normalized")]
    DegenerateDepth { max_depth: f32 },
}

/// Result of projecting one scan. Only constructed by [`project`], so a
/// `Projection` always holds at least one point and a positive `max_depth`.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    points: Vec<ProjectedPoint>,
    max_depth: f32,
    vanishing_point: VanishingPoint,
    effective_fov_deg: f32,
    horizontal_px_per_degree: f32,
}

impl Projection {
    /// Sorted ascending by `angle_key`
    pub fn points(&self) -> &[ProjectedPoint] {
        &self.points
    }

    pub fn max_depth(&self) -> f32 {
        self.max_depth
    }

    pub fn vanishing_point(&self) -> VanishingPoint {
        self.vanishing_point
    }

    pub fn effective_fov_deg(&self) -> f32 {
        self.effective_fov_deg
    }

    pub fn horizontal_px_per_degree(&self) -> f32 {
        self.horizontal_px_per_degree
    }
}

/// The LiDAR sits behind the camera, so the camera's horizontal FOV covers a
/// different angle as seen from the LiDAR. The width is taken at the distance
/// of the forward reading.
pub fn effective_fov_deg(
    scan: &Scan,
    camera: &CameraConfig,
    mount: &MountOffset,
    mode: FovMode,
) -> Result<f32, ProjectionError> {
    match mode {
        FovMode::CameraEqual => Ok(camera.horizontal_fov_deg),
        FovMode::Reconciled => {
            let forward = scan.forward_distance().ok_or_else(|| {
                ProjectionError::InvalidInput("Scan has no reading at 0 deg".into())
            })?;
            if forward == 0. {
                return Err(ProjectionError::InvalidInput(
                    "Reading at 0 deg has no return".into(),
                ));
            }
            let vantage = forward + mount.longitudinal_mm;
            if vantage <= 0. {
                return Err(ProjectionError::InvalidInput(format!(
                    "Reading at 0 deg ({forward} mm) is within the mount offset ({} mm)",
                    mount.longitudinal_mm
                )));
            }
            let half_width = forward * (camera.horizontal_fov_deg / 2.).to_radians().tan();
            Ok(2. * (half_width / vantage).atan().to_degrees())
        }
    }
}

/// Keeps readings within the two-sided window around the forward axis and
/// moves them into the camera frame. Output keeps the scan order.
pub fn project_points(
    samples: &[RawSample],
    effective_fov_deg: f32,
    mount: &MountOffset,
) -> Vec<ProjectedPoint> {
    let max_angle = effective_fov_deg / 2.;
    let min_angle = 360. - max_angle;

    samples
        .iter()
        .filter(|s| (s.angle_deg >= min_angle || s.angle_deg <= max_angle) && s.distance_mm != 0.)
        .map(|s| ProjectedPoint {
            angle_key: if s.angle_deg >= min_angle {
                s.angle_deg - 360.
            } else {
                s.angle_deg
            },
            // cos of the sensor angle, not the wrapped key
            depth_mm: (s.distance_mm + mount.longitudinal_mm) * s.angle_deg.to_radians().cos(),
            sensor_angle_deg: s.angle_deg,
        })
        .collect()
}

/// Returns the deepest point, ties resolve to the first one in `points` order.
pub fn find_vanishing_point(points: &[ProjectedPoint]) -> Option<&ProjectedPoint> {
    points.iter().fold(None, |acc: Option<&ProjectedPoint>, p| match acc {
        Some(best) if best.depth_mm >= p.depth_mm => Some(best),
        _ => Some(p),
    })
}

pub fn horizontal_px(angle_key: f32, resolution_x: u32, px_per_degree: f32) -> f32 {
    resolution_x as f32 / 2. + angle_key * px_per_degree
}

pub fn project(
    scan: &Scan,
    camera: &CameraConfig,
    mount: &MountOffset,
    mode: FovMode,
) -> Result<Projection, ProjectionError> {
    // Without a single return there is nothing to reconcile the FOV against either
    if scan.samples().iter().all(|s| s.distance_mm == 0.) {
        return Err(ProjectionError::EmptyResult {
            fov_deg: camera.horizontal_fov_deg,
        });
    }
    let effective_fov_deg = effective_fov_deg(scan, camera, mount, mode)?;
    let horizontal_px_per_degree = camera.horizontal_resolution_px as f32 / effective_fov_deg;
    log::debug!(
        "Effective FOV {effective_fov_deg:.2} deg ({:?}), {horizontal_px_per_degree:.3} px/deg",
        mode
    );

    let mut points = project_points(scan.samples(), effective_fov_deg, mount);
    let deepest = *find_vanishing_point(&points).ok_or(ProjectionError::EmptyResult {
        fov_deg: effective_fov_deg,
    })?;
    if !(deepest.depth_mm > 0.) {
        return Err(ProjectionError::DegenerateDepth {
            max_depth: deepest.depth_mm,
        });
    }
    let vanishing_point = VanishingPoint {
        x: horizontal_px(
            deepest.angle_key,
            camera.horizontal_resolution_px,
            horizontal_px_per_degree,
        ),
        angle_key: deepest.angle_key,
    };

    points.sort_by(|a, b| a.angle_key.total_cmp(&b.angle_key));
    log::debug!(
        "{} of {} readings in view, max depth {:.1} mm at {:.2} deg",
        points.len(),
        scan.len(),
        deepest.depth_mm,
        deepest.angle_key
    );

    Ok(Projection {
        points,
        max_depth: deepest.depth_mm,
        vanishing_point,
        effective_fov_deg,
        horizontal_px_per_degree,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> (CameraConfig, MountOffset) {
        (
            CameraConfig::default(),
            MountOffset {
                vertical_mm: 55.,
                longitudinal_mm: -120.,
            },
        )
    }

    fn example_scan() -> Scan {
        Scan::from_pairs([(0., 1000.), (30., 1200.), (350., 900.)])
    }

    #[test]
    fn example_scan_sorted_and_wrapped() {
        let (camera, mount) = rig();
        let projection = project(&example_scan(), &camera, &mount, FovMode::Reconciled).unwrap();
        let keys = projection
            .points()
            .iter()
            .map(|p| p.angle_key)
            .collect::<Vec<_>>();
        assert_eq!(vec![-10., 0., 30.], keys);
    }

    #[test]
    fn example_scan_vanishing_point() {
        let (camera, mount) = rig();
        let projection = project(&example_scan(), &camera, &mount, FovMode::Reconciled).unwrap();
        // 1080 * cos(30deg) beats 880 * cos(0deg)
        let expected = 1080. * 30f32.to_radians().cos();
        assert!((projection.max_depth() - expected).abs() < 1e-3);
        let vp = projection.vanishing_point();
        assert_eq!(30., vp.angle_key);
        let px_per_deg = 640. / projection.effective_fov_deg();
        assert!((vp.x - (320. + 30. * px_per_deg)).abs() < 1e-3);
    }

    #[test]
    fn reconciled_fov_is_wider_than_camera() {
        let (camera, mount) = rig();
        let fov = effective_fov_deg(&example_scan(), &camera, &mount, FovMode::Reconciled).unwrap();
        let expected = 2. * (1000. * 43f32.to_radians().tan() / 880.).atan().to_degrees();
        assert!((fov - expected).abs() < 1e-4);
        assert!(fov > 86.);
    }

    #[test]
    fn camera_equal_needs_no_forward_reading() {
        let (camera, mount) = rig();
        let scan = Scan::from_pairs([(10., 1000.)]);
        assert_eq!(
            86.,
            effective_fov_deg(&scan, &camera, &mount, FovMode::CameraEqual).unwrap()
        );
        assert!(project(&scan, &camera, &mount, FovMode::CameraEqual).is_ok());
    }

    #[test]
    fn missing_forward_reading_is_invalid() {
        let (camera, mount) = rig();
        let scan = Scan::from_pairs([(10., 1000.)]);
        assert!(matches!(
            project(&scan, &camera, &mount, FovMode::Reconciled),
            Err(ProjectionError::InvalidInput(_))
        ));
    }

    #[test]
    fn forward_reading_inside_offset_is_invalid() {
        let (camera, mount) = rig();
        let scan = Scan::from_pairs([(0., 100.)]);
        assert!(matches!(
            project(&scan, &camera, &mount, FovMode::Reconciled),
            Err(ProjectionError::InvalidInput(_))
        ));
    }

    #[test]
    fn all_zero_is_empty() {
        let (camera, mount) = rig();
        let scan = Scan::from_pairs([(0., 0.), (10., 0.), (350., 0.)]);
        assert!(matches!(
            project(&scan, &camera, &mount, FovMode::CameraEqual),
            Err(ProjectionError::EmptyResult { .. })
        ));
    }

    #[test]
    fn all_zero_is_empty_when_reconciled() {
        let (camera, mount) = rig();
        let scan = Scan::from_pairs([(0., 0.), (10., 0.), (350., 0.)]);
        assert!(matches!(
            project(&scan, &camera, &mount, FovMode::Reconciled),
            Err(ProjectionError::EmptyResult { .. })
        ));
    }

    #[test]
    fn forward_without_return_is_invalid_if_others_return() {
        let (camera, mount) = rig();
        let scan = Scan::from_pairs([(0., 0.), (10., 1000.)]);
        assert!(matches!(
            project(&scan, &camera, &mount, FovMode::Reconciled),
            Err(ProjectionError::InvalidInput(_))
        ));
    }

    #[test]
    fn only_out_of_view_is_empty() {
        let (camera, mount) = rig();
        let scan = Scan::from_pairs([(90., 1000.), (180., 1000.)]);
        assert!(matches!(
            project(&scan, &camera, &mount, FovMode::CameraEqual),
            Err(ProjectionError::EmptyResult { .. })
        ));
    }

    #[test]
    fn non_positive_max_depth_is_degenerate() {
        let (camera, mount) = rig();
        let scan = Scan::from_pairs([(5., 120.), (10., 50.)]);
        assert!(matches!(
            project(&scan, &camera, &mount, FovMode::CameraEqual),
            Err(ProjectionError::DegenerateDepth { .. })
        ));
    }

    #[test]
    fn boundary_is_inclusive() {
        let (_, mount) = rig();
        let samples = Scan::from_pairs([(43., 500.), (317., 500.), (43.5, 500.), (316.5, 500.)]);
        let points = project_points(samples.samples(), 86., &mount);
        let keys = points.iter().map(|p| p.angle_key).collect::<Vec<_>>();
        assert_eq!(vec![43., -43.], keys);
    }

    #[test]
    fn zero_distance_excluded_everywhere() {
        let (_, mount) = rig();
        let samples = Scan::from_pairs([(0., 0.), (43., 0.), (317., 0.)]);
        assert!(project_points(samples.samples(), 86., &mount).is_empty());
    }

    #[test]
    fn depth_uses_sensor_angle_at_boundary() {
        let (_, mount) = rig();
        let samples = Scan::from_pairs([(317., 1000.)]);
        let point = project_points(samples.samples(), 86., &mount)[0];
        assert_eq!(-43., point.angle_key);
        assert_eq!(317., point.sensor_angle_deg);
        assert_eq!(880. * 317f32.to_radians().cos(), point.depth_mm);
    }

    #[test]
    fn ties_keep_first_in_scan_order() {
        let point = |angle_key: f32| ProjectedPoint {
            angle_key,
            depth_mm: 500.,
            sensor_angle_deg: angle_key.rem_euclid(360.),
        };
        let points = [point(10.), point(-10.), point(20.)];
        assert_eq!(10., find_vanishing_point(&points).unwrap().angle_key);
    }

    #[test]
    fn scan_order_is_ascending_sensor_angle() {
        let (_, mount) = rig();
        let scan = Scan::from_pairs([(355., 1000.), (5., 1000.)]);
        let mut points = project_points(scan.samples(), 86., &mount);
        let sensor_angles = points.iter().map(|p| p.sensor_angle_deg).collect::<Vec<_>>();
        assert_eq!(vec![5., 355.], sensor_angles);

        // Force an exact tie, the reading scanned first has to win
        points[1].depth_mm = points[0].depth_mm;
        assert_eq!(5., find_vanishing_point(&points).unwrap().angle_key);
    }

    #[test]
    fn find_vanishing_point_on_empty() {
        assert!(find_vanishing_point(&[]).is_none());
    }

    #[test]
    fn idempotent() {
        let (camera, mount) = rig();
        let a = project(&example_scan(), &camera, &mount, FovMode::Reconciled).unwrap();
        let b = project(&example_scan(), &camera, &mount, FovMode::Reconciled).unwrap();
        assert_eq!(a, b);
    }
}
