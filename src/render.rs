use crate::{projection::horizontal_px, CameraConfig, MarkerStyle, MountOffset, Projection};

/// One marker on the overlay canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawInstruction {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
    pub color: [u8; 3],
    pub opacity: u8,
}

/// Fixed pixel rows between which markers are interpolated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenAnchors {
    pub marker_y: f32,
    pub vanishing_point_y: f32,
}

impl ScreenAnchors {
    pub fn new(camera: &CameraConfig, mount: &MountOffset) -> Self {
        let px_per_mm = camera.vertical_px_per_mm();
        Self {
            marker_y: camera.vertical_centre_px - mount.vertical_mm / px_per_mm,
            vanishing_point_y: camera.vertical_centre_px
                - mount.vertical_mm / camera.vertical_centre_mm
                    * camera.focal_length_mm
                    * px_per_mm,
        }
    }
}

/// 0 for the deepest reading, 1 for readings right at the camera
pub fn depth_weight(depth_mm: f32, max_depth: f32) -> f32 {
    (1. - depth_mm / max_depth).clamp(0., 1.)
}

/// Emits one marker per projected point, in the same order.
///
/// Points up to the vanishing point walk from `marker_y` towards the horizon,
/// points after it walk back, each side at its own pace.
pub fn render(
    projection: &Projection,
    camera: &CameraConfig,
    mount: &MountOffset,
    style: &MarkerStyle,
) -> Vec<DrawInstruction> {
    let anchors = ScreenAnchors::new(camera, mount);
    let anchor_key = projection.vanishing_point().angle_key;
    let px_per_degree = projection.horizontal_px_per_degree();
    let points = projection.points();

    let towards_len = points.iter().filter(|p| p.angle_key <= anchor_key).count();
    let away_len = points.len() - towards_len;
    let (mut towards_idx, mut away_idx) = (0usize, 0usize);

    points
        .iter()
        .map(|p| {
            let center_y = if p.angle_key <= anchor_key {
                let t = towards_idx as f32 / towards_len as f32;
                towards_idx += 1;
                anchors.marker_y + t * (anchors.vanishing_point_y - anchors.marker_y)
            } else {
                let t = away_idx as f32 / away_len as f32;
                away_idx += 1;
                anchors.vanishing_point_y + t * (anchors.marker_y - anchors.vanishing_point_y)
            };
            let (color, opacity) = style.visual(depth_weight(p.depth_mm, projection.max_depth()));
            DrawInstruction {
                center_x: horizontal_px(p.angle_key, camera.horizontal_resolution_px, px_per_degree),
                center_y,
                radius: px_per_degree,
                color,
                opacity,
            }
        })
        .collect()
}
