use crate::*;

/// Intersection test between 2 geometric primitives
pub trait Intersect<Rhs = Self> {
    type Output;

    fn intersect(self, rhs: Rhs) -> Self::Output;
}

//------------------------------------------------------------------------------------------------------------------------------
// Ray
//------------------------------------------------------------------------------------------------------------------------------

//- Ray-triangle intersection --------------------------------------------------------------------------------------------------

/// Ray parameter of the hit, the distance along the ray when its direction has unit length
impl Intersect<&Triangle> for &Ray3 {
    type Output = Option<f64>;

    fn intersect(self, triangle: &Triangle) -> Option<f64> {
        self.triangle_hit(triangle.a(), triangle.b(), triangle.c()).map(|(t, _, _)| t)
    }
}

impl Intersect<&Ray3> for &Triangle {
    type Output = Option<f64>;

    fn intersect(self, ray: &Ray3) -> Option<f64> {
        ray.intersect(self)
    }
}

//- Ray-plane intersection -----------------------------------------------------------------------------------------------------

/// Ray parameter of the hit, the distance along the ray when its direction has unit length
impl Intersect<&Plane> for &Ray3 {
    type Output = Option<f64>;

    fn intersect(self, plane: &Plane) -> Option<f64> {
        self.plane_hit(plane)
    }
}

impl Intersect<&Ray3> for &Plane {
    type Output = Option<f64>;

    fn intersect(self, ray: &Ray3) -> Option<f64> {
        ray.intersect(self)
    }
}

//- Ray-rectangle intersection -------------------------------------------------------------------------------------------------

/// Ray parameter of the hit, the distance along the ray when its direction has unit length
impl Intersect<&Rectangle3> for &Ray3 {
    type Output = Option<f64>;

    fn intersect(self, rect: &Rectangle3) -> Option<f64> {
        let d = rect.d();
        self.triangle_hit(rect.a, rect.b, d)
            .or_else(|| self.triangle_hit(rect.a, d, rect.c))
            .map(|(t, _, _)| t)
    }
}

#[cfg(test)]
mod test;
