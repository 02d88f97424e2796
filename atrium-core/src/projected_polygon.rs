use glam::Vec2;

pub const MAX_PROJECTED_POLYGON_VERTEX_COUNT: usize = 8;

// which face slabs of the cube the camera is beyond, OR'd into the
// projection type of the resulting silhouette
pub const PROJECTION_RIGHT: u8 = 1;
pub const PROJECTION_LEFT: u8 = 2;
pub const PROJECTION_BOTTOM: u8 = 4;
pub const PROJECTION_TOP: u8 = 8;
pub const PROJECTION_NEAR: u8 = 16;
pub const PROJECTION_FAR: u8 = 32;

/// Screen-space axis-aligned rectangle. Starts out unset; the first
/// `expand_to_include` adopts the included bounds.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoundingRectangle {
    pub corner: Vec2,
    pub size: Vec2,
    set: bool,
}

impl BoundingRectangle {
    pub const BOTTOM_LEFT: usize = 0;
    pub const BOTTOM_RIGHT: usize = 1;
    pub const TOP_RIGHT: usize = 2;
    pub const TOP_LEFT: usize = 3;
    pub const VERTEX_COUNT: usize = 4;

    pub fn new(corner: Vec2, size: Vec2) -> BoundingRectangle {
        BoundingRectangle {
            corner,
            size,
            set: true,
        }
    }

    pub fn is_set(&self) -> bool {
        self.set
    }

    /// Corners in counter-clockwise order starting at the bottom left.
    pub fn vertex(&self, vertex_number: usize) -> Vec2 {
        match vertex_number {
            BoundingRectangle::BOTTOM_LEFT => self.corner,
            BoundingRectangle::BOTTOM_RIGHT => Vec2::new(self.corner.x + self.size.x, self.corner.y),
            BoundingRectangle::TOP_RIGHT => self.corner + self.size,
            BoundingRectangle::TOP_LEFT => Vec2::new(self.corner.x, self.corner.y + self.size.y),
            _ => unreachable!("bad rectangle vertex {}", vertex_number),
        }
    }

    pub fn top_half(&self) -> BoundingRectangle {
        let half_y = self.size.y / 2.0;
        BoundingRectangle::new(
            Vec2::new(self.corner.x, self.corner.y + half_y),
            Vec2::new(self.size.x, half_y),
        )
    }

    pub fn bottom_half(&self) -> BoundingRectangle {
        BoundingRectangle::new(self.corner, Vec2::new(self.size.x, self.size.y / 2.0))
    }

    pub fn left_half(&self) -> BoundingRectangle {
        BoundingRectangle::new(self.corner, Vec2::new(self.size.x / 2.0, self.size.y))
    }

    pub fn right_half(&self) -> BoundingRectangle {
        let half_x = self.size.x / 2.0;
        BoundingRectangle::new(
            Vec2::new(self.corner.x + half_x, self.corner.y),
            Vec2::new(half_x, self.size.y),
        )
    }

    pub fn contains_rectangle(&self, other: &BoundingRectangle) -> bool {
        self.set
            && other.corner.x >= self.corner.x
            && other.corner.y >= self.corner.y
            && other.corner.x + other.size.x <= self.corner.x + self.size.x
            && other.corner.y + other.size.y <= self.corner.y + self.size.y
    }

    /// Strictly inside; points on the boundary don't count.
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.set
            && point.x > self.corner.x
            && point.y > self.corner.y
            && point.x < self.corner.x + self.size.x
            && point.y < self.corner.y + self.size.y
    }

    pub fn intersects(&self, other: &BoundingRectangle) -> bool {
        self.set
            && other.corner.x + other.size.x >= self.corner.x
            && other.corner.y + other.size.y >= self.corner.y
            && other.corner.x <= self.corner.x + self.size.x
            && other.corner.y <= self.corner.y + self.size.y
    }

    pub fn expand_to_include(&mut self, other: &BoundingRectangle) {
        if !self.set {
            *self = *other;
            self.set = true;
        } else {
            let minimum = self.corner.min(other.corner);
            let maximum = (self.corner + self.size).max(other.corner + other.size);
            self.corner = minimum;
            self.size = maximum - minimum;
        }
    }
}

/// The 2D silhouette of a projected cube: up to 8 vertices in
/// counter-clockwise order, with cached bounds and view flags.
#[derive(Copy, Clone, Debug)]
pub struct CubeProjectedPolygon {
    vertices: [Vec2; MAX_PROJECTED_POLYGON_VERTEX_COUNT],
    vertex_count: usize,
    min: Vec2,
    max: Vec2,
    pub distance: f32,
    pub any_in_view: bool,
    pub all_in_view: bool,
    pub projection_type: u8,
}

impl CubeProjectedPolygon {
    pub fn new(vertex_count: usize) -> CubeProjectedPolygon {
        CubeProjectedPolygon {
            vertices: [Vec2::ZERO; MAX_PROJECTED_POLYGON_VERTEX_COUNT],
            vertex_count,
            min: Vec2::splat(f32::MAX),
            max: Vec2::splat(-f32::MAX),
            distance: 0.0,
            any_in_view: false,
            all_in_view: false,
            projection_type: 0,
        }
    }

    pub fn from_rectangle(rectangle: &BoundingRectangle) -> CubeProjectedPolygon {
        let mut polygon = CubeProjectedPolygon::new(BoundingRectangle::VERTEX_COUNT);
        for i in 0..BoundingRectangle::VERTEX_COUNT {
            polygon.set_vertex(i, rectangle.vertex(i));
        }
        polygon
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn vertex(&self, index: usize) -> Vec2 {
        self.vertices[index]
    }

    pub fn set_vertex(&mut self, index: usize, point: Vec2) {
        self.vertices[index] = point;
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn min_x(&self) -> f32 {
        self.min.x
    }

    pub fn min_y(&self) -> f32 {
        self.min.y
    }

    pub fn max_x(&self) -> f32 {
        self.max.x
    }

    pub fn max_y(&self) -> f32 {
        self.max.y
    }

    pub fn bounding_rectangle(&self) -> BoundingRectangle {
        BoundingRectangle::new(self.min, self.max - self.min)
    }

    /// True if this polygon completely covers the occludee. Polygons only
    /// partially in view never occlude, since their projection is suspect.
    pub fn occludes(&self, occludee: &CubeProjectedPolygon) -> bool {
        if !self.all_in_view || !occludee.all_in_view {
            return false;
        }

        // the occludee must lie within our bounds to begin with
        if occludee.max.x > self.max.x
            || occludee.max.y > self.max.y
            || occludee.min.x < self.min.x
            || occludee.min.y < self.min.y
        {
            return false;
        }

        // identical polygons occlude each other even though their vertices
        // are on, not inside, our edges
        let potential_identity = occludee.vertex_count == self.vertex_count
            && self.bounding_rectangle().contains_rectangle(&occludee.bounding_rectangle());

        let mut points_inside = 0;
        for i in 0..occludee.vertex_count {
            let point = occludee.vertex(i);
            if self.point_inside(point) {
                points_inside += 1;
            } else {
                let matches_vertex = self.vertices[..self.vertex_count].contains(&point);
                if !potential_identity || !matches_vertex {
                    return false;
                }
            }
        }

        if points_inside == occludee.vertex_count {
            return true;
        }
        if potential_identity {
            return self.matches(occludee);
        }
        false
    }

    pub fn occludes_rectangle(&self, rectangle: &BoundingRectangle) -> bool {
        self.occludes(&CubeProjectedPolygon::from_rectangle(rectangle))
    }

    /// Same vertex cycle, allowing the other polygon to start anywhere in it.
    pub fn matches(&self, testee: &CubeProjectedPolygon) -> bool {
        if testee.vertex_count != self.vertex_count {
            return false;
        }
        let origin = self.vertices[0];
        let origin_index = match (0..self.vertex_count).find(|&i| testee.vertex(i) == origin) {
            Some(index) => index,
            None => return false,
        };
        (0..self.vertex_count)
            .all(|i| testee.vertex((i + origin_index) % self.vertex_count) == self.vertex(i))
    }

    pub fn point_inside(&self, point: Vec2) -> bool {
        if point.x > self.max.x || point.y > self.max.y || point.x < self.min.x || point.y < self.min.y {
            return false;
        }

        // check the point against each edge
        for i in 0..self.vertex_count {
            let start = self.vertex(i);
            let end = self.vertex((i + 1) % self.vertex_count);
            let a = start.y - end.y;
            let b = end.x - start.x;
            let c = a * start.x + b * start.y;
            if a * point.x + b * point.y < c {
                return false;
            }
        }
        true
    }

    pub fn intersects(&self, testee: &CubeProjectedPolygon) -> bool {
        self.intersects_on_axes(testee) && testee.intersects_on_axes(self)
    }

    pub fn intersects_rectangle(&self, rectangle: &BoundingRectangle) -> bool {
        self.intersects(&CubeProjectedPolygon::from_rectangle(rectangle))
    }

    // Tests the edges of this polygon as potential separating axes. Only
    // works on convex polygons; points exactly on an edge count as inside.
    fn intersects_on_axes(&self, testee: &CubeProjectedPolygon) -> bool {
        'edges: for i in 0..self.vertex_count {
            let start = self.vertex(i);
            let end = self.vertex((i + 1) % self.vertex_count);
            let a = start.y - end.y;
            let b = end.x - start.x;
            let c = a * start.x + b * start.y;

            for j in 0..testee.vertex_count {
                let vertex = testee.vertex(j);
                if a * vertex.x + b * vertex.y >= c {
                    continue 'edges;
                }
            }
            // every vertex fell outside this edge, so the polygons are disjoint
            return false;
        }
        true
    }
}
