use ardor_logging::log_warning;
use crate::*;

/// Polygons with more vertices than this use a z-order curve to speed up the ear test
const Z_HASH_THRESHOLD : usize = 80;

/// Triangulate a simple polygon with optional holes by ear clipping
///
/// `vertices` holds the outer ring followed by the rings of each hole, `hole_indices` holds the index of the first vertex of each hole.
/// Either winding can be used for any ring.
///
/// Returns a list of vertex indices, 3 per triangle, all triangles wound the same way.
/// A polygon that has too few distinct vertices to form a ring results in an empty list.
pub fn triangulate(vertices: &[Vector2], hole_indices: &[usize]) -> Result<Vec<usize>> {
    let holes_valid = hole_indices.first().map_or(true, |first| *first > 0)
        && hole_indices.windows(2).all(|pair| pair[0] < pair[1])
        && hole_indices.last().map_or(true, |last| *last < vertices.len());
    if !holes_valid {
        return Err(Error::InvalidHoleIndices);
    }

    let outer_len = hole_indices.first().copied().unwrap_or(vertices.len());
    let mut clipper = EarClipper::default();
    let outer = match clipper.linked_list(vertices, 0, outer_len, true) {
        Some(outer) if clipper.next(outer) != clipper.prev(outer) => outer,
        _ => {
            log_warning!(LOG_CAT, "Polygon with {} outer vertices does not form a valid ring, no triangles were created", outer_len);
            return Ok(Vec::new());
        },
    };

    let outer = if hole_indices.is_empty() { outer } else { clipper.eliminate_holes(vertices, hole_indices, outer) };
    let hash = if vertices.len() > Z_HASH_THRESHOLD { ZHash::new(&vertices[..outer_len]) } else { None };
    clipper.earcut_linked(Some(outer), hash, 0);
    Ok(clipper.indices)
}

//------------------------------------------------------------------------------------------------------------------------------

/// Maps positions onto a z-order curve over the bounding box of the outer ring
#[derive(Clone, Copy, Debug)]
struct ZHash {
    min_x    : f64,
    min_y    : f64,
    inv_size : f64,
}

impl ZHash {
    fn new(outer: &[Vector2]) -> Option<Self> {
        let first = outer.first()?;
        let (mut min, mut max) = (*first, *first);
        for vert in &outer[1..] {
            min.x = min.x.min(vert.x);
            min.y = min.y.min(vert.y);
            max.x = max.x.max(vert.x);
            max.y = max.y.max(vert.y);
        }

        let size = (max.x - min.x).max(max.y - min.y);
        (size.abs() > ZERO_TOLERANCE).then(|| Self { min_x: min.x, min_y: min.y, inv_size: 1.0 / size })
    }

    /// Interleave the bits of the position mapped to 15-bit integers
    fn z_order(self, x: f64, y: f64) -> i32 {
        let spread = |val: f64| {
            let mut val = val as i32;
            val = (val | val << 8) & 0x00FF_00FF;
            val = (val | val << 4) & 0x0F0F_0F0F;
            val = (val | val << 2) & 0x3333_3333;
            (val | val << 1) & 0x5555_5555
        };
        spread(32767.0 * (x - self.min_x) * self.inv_size) | spread(32767.0 * (y - self.min_y) * self.inv_size) << 1
    }
}

#[derive(Clone, Debug)]
struct Node {
    /// Index of the vertex in the input
    vertex  : usize,
    x       : f64,
    y       : f64,
    prev    : usize,
    next    : usize,
    z       : i32,
    prev_z  : Option<usize>,
    next_z  : Option<usize>,
    /// Single vertex hole, never filtered out
    steiner : bool,
}

/// Circular doubly linked rings stored in an arena, removed nodes are unlinked but stay allocated
#[derive(Default)]
struct EarClipper {
    nodes   : Vec<Node>,
    indices : Vec<usize>,
}

impl EarClipper {
    fn prev(&self, node: usize) -> usize {
        self.nodes[node].prev
    }

    fn next(&self, node: usize) -> usize {
        self.nodes[node].next
    }

    fn pos(&self, node: usize) -> (f64, f64) {
        (self.nodes[node].x, self.nodes[node].y)
    }

    fn same_pos(&self, a: usize, b: usize) -> bool {
        self.pos(a) == self.pos(b)
    }

    /// Twice the signed area of the triangle, negative for a convex corner of a ring
    fn area(&self, p: usize, q: usize, r: usize) -> f64 {
        let (p, q, r) = (self.pos(p), self.pos(q), self.pos(r));
        (q.1 - p.1) * (r.0 - q.0) - (q.0 - p.0) * (r.1 - q.1)
    }

    fn alloc(&mut self, vertex: usize, x: f64, y: f64) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(Node { vertex, x, y, prev: idx, next: idx, z: 0, prev_z: None, next_z: None, steiner: false });
        idx
    }

    fn insert_after(&mut self, vertex: usize, pos: Vector2, last: Option<usize>) -> usize {
        let node = self.alloc(vertex, pos.x, pos.y);
        if let Some(last) = last {
            let next = self.next(last);
            self.nodes[node].next = next;
            self.nodes[node].prev = last;
            self.nodes[next].prev = node;
            self.nodes[last].next = node;
        }
        node
    }

    fn remove(&mut self, node: usize) {
        let Node { prev, next, prev_z, next_z, .. } = self.nodes[node];
        self.nodes[next].prev = prev;
        self.nodes[prev].next = next;
        if let Some(prev_z) = prev_z {
            self.nodes[prev_z].next_z = next_z;
        }
        if let Some(next_z) = next_z {
            self.nodes[next_z].prev_z = prev_z;
        }
    }

    /// Build a ring from `vertices[start..end]`, counter-clockwise for `outer` rings and clockwise for holes
    fn linked_list(&mut self, vertices: &[Vector2], start: usize, end: usize, outer: bool) -> Option<usize> {
        let ring = &vertices[start..end];
        let mut last = None;
        if outer == (signed_area(ring) > 0.0) {
            for (offset, vert) in ring.iter().enumerate() {
                last = Some(self.insert_after(start + offset, *vert, last));
            }
        } else {
            for (offset, vert) in ring.iter().enumerate().rev() {
                last = Some(self.insert_after(start + offset, *vert, last));
            }
        }

        let last = last?;
        if self.same_pos(last, self.next(last)) {
            self.remove(last);
            return Some(self.next(last));
        }
        Some(last)
    }

    /// Remove duplicate and collinear points, returning a node still in the ring
    fn filter_points(&mut self, start: usize, end: Option<usize>) -> usize {
        let mut end = end.unwrap_or(start);
        let mut p = start;
        loop {
            let (prev, next) = (self.prev(p), self.next(p));
            if !self.nodes[p].steiner && (self.same_pos(p, next) || self.area(prev, p, next) == 0.0) {
                self.remove(p);
                p = prev;
                end = prev;
                if p == self.next(p) {
                    break;
                }
            } else {
                p = next;
                if p == end {
                    break;
                }
            }
        }
        end
    }

    fn earcut_linked(&mut self, ear: Option<usize>, hash: Option<ZHash>, pass: u8) {
        let Some(mut ear) = ear else { return };
        if pass == 0 {
            if let Some(hash) = hash {
                self.index_curve(ear, hash);
            }
        }

        let mut stop = ear;
        while self.prev(ear) != self.next(ear) {
            let (prev, next) = (self.prev(ear), self.next(ear));
            let is_ear = match hash {
                Some(hash) => self.is_ear_hashed(ear, hash),
                None => self.is_ear(ear),
            };

            if is_ear {
                self.indices.extend([self.nodes[prev].vertex, self.nodes[ear].vertex, self.nodes[next].vertex]);
                self.remove(ear);
                // Skipping the next vertex gives fewer sliver triangles
                ear = self.next(next);
                stop = ear;
                continue;
            }

            ear = next;
            if ear == stop {
                // No ear left, try to recover with increasingly invasive fixes
                match pass {
                    0 => {
                        let filtered = self.filter_points(ear, None);
                        self.earcut_linked(Some(filtered), hash, 1);
                    },
                    1 => {
                        let cured = self.cure_local_intersections(ear);
                        self.earcut_linked(Some(cured), hash, 2);
                    },
                    _ => self.split_earcut(ear, hash),
                }
                break;
            }
        }
    }

    fn is_ear(&self, ear: usize) -> bool {
        let (a, c) = (self.prev(ear), self.next(ear));
        if self.area(a, ear, c) >= 0.0 {
            return false;
        }

        let mut p = self.next(c);
        while p != a {
            if self.blocks_ear(p, a, ear, c) {
                return false;
            }
            p = self.next(p);
        }
        true
    }

    /// Ear test only looking at nodes whose z-order falls in the bounding box of the ear
    fn is_ear_hashed(&self, ear: usize, hash: ZHash) -> bool {
        let (a, c) = (self.prev(ear), self.next(ear));
        if self.area(a, ear, c) >= 0.0 {
            return false;
        }

        let ((ax, ay), (bx, by), (cx, cy)) = (self.pos(a), self.pos(ear), self.pos(c));
        let min_z = hash.z_order(ax.min(bx).min(cx), ay.min(by).min(cy));
        let max_z = hash.z_order(ax.max(bx).max(cx), ay.max(by).max(cy));
        let blocks = |node: usize| node != a && node != c && self.blocks_ear(node, a, ear, c);

        let mut p = self.nodes[ear].prev_z;
        let mut n = self.nodes[ear].next_z;
        while let (Some(pz), Some(nz)) = (p, n) {
            if self.nodes[pz].z < min_z || self.nodes[nz].z > max_z {
                break;
            }
            if blocks(pz) {
                return false;
            }
            p = self.nodes[pz].prev_z;
            if blocks(nz) {
                return false;
            }
            n = self.nodes[nz].next_z;
        }

        while let Some(pz) = p.filter(|pz| self.nodes[*pz].z >= min_z) {
            if blocks(pz) {
                return false;
            }
            p = self.nodes[pz].prev_z;
        }
        while let Some(nz) = n.filter(|nz| self.nodes[*nz].z <= max_z) {
            if blocks(nz) {
                return false;
            }
            n = self.nodes[nz].next_z;
        }
        true
    }

    /// Check if a reflex node lies inside the triangle `a, b, c`
    fn blocks_ear(&self, node: usize, a: usize, b: usize, c: usize) -> bool {
        point_in_triangle(self.pos(a), self.pos(b), self.pos(c), self.pos(node))
            && self.area(self.prev(node), node, self.next(node)) >= 0.0
    }

    fn cure_local_intersections(&mut self, start: usize) -> usize {
        let mut start = start;
        let mut p = start;
        loop {
            let a = self.prev(p);
            let b = self.next(self.next(p));
            if !self.same_pos(a, b) && self.intersects(a, p, self.next(p), b) && self.locally_inside(a, b) && self.locally_inside(b, a) {
                self.indices.extend([self.nodes[a].vertex, self.nodes[p].vertex, self.nodes[b].vertex]);
                let next = self.next(p);
                self.remove(p);
                self.remove(next);
                p = b;
                start = b;
            }
            p = self.next(p);
            if p == start {
                return p;
            }
        }
    }

    /// Split the ring along a valid diagonal and triangulate both halves
    fn split_earcut(&mut self, start: usize, hash: Option<ZHash>) {
        let mut a = start;
        loop {
            let mut b = self.next(self.next(a));
            while b != self.prev(a) {
                if self.nodes[a].vertex != self.nodes[b].vertex && self.is_valid_diagonal(a, b) {
                    let c = self.split_polygon(a, b);
                    let a = self.filter_points(a, Some(self.next(a)));
                    let c = self.filter_points(c, Some(self.next(c)));
                    self.earcut_linked(Some(a), hash, 0);
                    self.earcut_linked(Some(c), hash, 0);
                    return;
                }
                b = self.next(b);
            }
            a = self.next(a);
            if a == start {
                return;
            }
        }
    }

    /// Bridge every hole into the outer ring, from left to right, producing a single ring
    fn eliminate_holes(&mut self, vertices: &[Vector2], hole_indices: &[usize], outer: usize) -> usize {
        let mut leftmost_nodes = Vec::with_capacity(hole_indices.len());
        for (idx, start) in hole_indices.iter().enumerate() {
            let end = hole_indices.get(idx + 1).copied().unwrap_or(vertices.len());
            if let Some(ring) = self.linked_list(vertices, *start, end, false) {
                if ring == self.next(ring) {
                    self.nodes[ring].steiner = true;
                }
                leftmost_nodes.push(self.leftmost(ring));
            }
        }
        leftmost_nodes.sort_by(|a, b| self.nodes[*a].x.partial_cmp(&self.nodes[*b].x).unwrap_or(core::cmp::Ordering::Equal));

        let mut outer = outer;
        for hole in leftmost_nodes {
            if let Some(bridge) = self.find_hole_bridge(hole, outer) {
                let joined = self.split_polygon(bridge, hole);
                self.filter_points(joined, Some(self.next(joined)));
            }
            outer = self.filter_points(outer, Some(self.next(outer)));
        }
        outer
    }

    /// Find the outer ring node to connect the leftmost node of a hole to (Eberly's bridge search)
    fn find_hole_bridge(&self, hole: usize, outer: usize) -> Option<usize> {
        let (hx, hy) = self.pos(hole);
        let mut qx = f64::NEG_INFINITY;
        let mut candidate = None;

        // Cast a ray from the hole to the left and find the closest crossing segment
        let mut p = outer;
        loop {
            let next = self.next(p);
            let ((px, py), (nx, ny)) = (self.pos(p), self.pos(next));
            if hy <= py && hy >= ny && ny != py {
                let x = px + (hy - py) * (nx - px) / (ny - py);
                if x <= hx && x > qx {
                    qx = x;
                    if x == hx {
                        if hy == py {
                            return Some(p);
                        }
                        if hy == ny {
                            return Some(next);
                        }
                    }
                    candidate = Some(if px < nx { p } else { next });
                }
            }
            p = next;
            if p == outer {
                break;
            }
        }

        let mut bridge = candidate?;
        if hx == qx {
            // The hole touches the outer segment
            return Some(self.prev(bridge));
        }

        // Nodes inside the triangle of hole, crossing and candidate block the bridge, pick the one with the smallest angle instead
        let stop = bridge;
        let (mx, my) = self.pos(bridge);
        let (tri_a, tri_c) = if hy < my { ((hx, hy), (qx, hy)) } else { ((qx, hy), (hx, hy)) };
        let mut tan_min = f64::INFINITY;
        let mut p = self.next(bridge);
        while p != stop {
            let (px, py) = self.pos(p);
            if hx >= px && px >= mx && hx != px && point_in_triangle(tri_a, (mx, my), tri_c, (px, py)) {
                let tan = (hy - py).abs() / (hx - px);
                if (tan < tan_min || (tan == tan_min && px > self.nodes[bridge].x)) && self.locally_inside(p, hole) {
                    bridge = p;
                    tan_min = tan;
                }
            }
            p = self.next(p);
        }
        Some(bridge)
    }

    /// Assign z-order values and sort the ring into a z-ordered list
    fn index_curve(&mut self, start: usize, hash: ZHash) {
        let mut p = start;
        loop {
            let (x, y) = self.pos(p);
            let node = &mut self.nodes[p];
            node.z = hash.z_order(x, y);
            node.prev_z = Some(node.prev);
            node.next_z = Some(node.next);
            p = node.next;
            if p == start {
                break;
            }
        }

        let tail = self.prev(start);
        self.nodes[tail].next_z = None;
        self.nodes[start].prev_z = None;
        self.sort_by_z(start);
    }

    /// Bottom-up merge sort of the z-order links
    fn sort_by_z(&mut self, head: usize) {
        let mut list = Some(head);
        let mut run_len = 1;
        loop {
            let mut p = list;
            let mut tail : Option<usize> = None;
            let mut merges = 0;
            list = None;

            while p.is_some() {
                merges += 1;
                let mut q = p;
                let mut p_len = 0;
                for _ in 0..run_len {
                    p_len += 1;
                    q = q.and_then(|node| self.nodes[node].next_z);
                    if q.is_none() {
                        break;
                    }
                }
                let mut q_len = run_len;

                while p_len > 0 || (q_len > 0 && q.is_some()) {
                    let take_p = p_len != 0 && match (p, q) {
                        (Some(pn), Some(qn)) if q_len != 0 => self.nodes[pn].z <= self.nodes[qn].z,
                        _ => true,
                    };
                    let Some(elem) = (if take_p { p } else { q }) else { break };
                    if take_p {
                        p = self.nodes[elem].next_z;
                        p_len -= 1;
                    } else {
                        q = self.nodes[elem].next_z;
                        q_len -= 1;
                    }

                    match tail {
                        Some(tail) => self.nodes[tail].next_z = Some(elem),
                        None => list = Some(elem),
                    }
                    self.nodes[elem].prev_z = tail;
                    tail = Some(elem);
                }
                p = q;
            }

            if let Some(tail) = tail {
                self.nodes[tail].next_z = None;
            }
            if merges <= 1 {
                return;
            }
            run_len *= 2;
        }
    }

    fn leftmost(&self, start: usize) -> usize {
        let mut p = start;
        let mut leftmost = start;
        loop {
            let ((px, py), (lx, ly)) = (self.pos(p), self.pos(leftmost));
            if px < lx || (px == lx && py < ly) {
                leftmost = p;
            }
            p = self.next(p);
            if p == start {
                return leftmost;
            }
        }
    }

    /// Check if the diagonal `a, b` lies in the interior of the ring
    fn is_valid_diagonal(&self, a: usize, b: usize) -> bool {
        let vertex = self.nodes[b].vertex;
        self.nodes[self.next(a)].vertex != vertex
            && self.nodes[self.prev(a)].vertex != vertex
            && !self.intersects_polygon(a, b)
            && self.locally_inside(a, b)
            && self.locally_inside(b, a)
            && self.middle_inside(a, b)
    }

    /// Check if the segments `p1, q1` and `p2, q2` intersect
    fn intersects(&self, p1: usize, q1: usize, p2: usize, q2: usize) -> bool {
        if (self.same_pos(p1, p2) && self.same_pos(q1, q2)) || (self.same_pos(p1, q2) && self.same_pos(p2, q1)) {
            return true;
        }
        (self.area(p1, q1, p2) > 0.0) != (self.area(p1, q1, q2) > 0.0)
            && (self.area(p2, q2, p1) > 0.0) != (self.area(p2, q2, q1) > 0.0)
    }

    fn intersects_polygon(&self, a: usize, b: usize) -> bool {
        let (va, vb) = (self.nodes[a].vertex, self.nodes[b].vertex);
        let mut p = a;
        loop {
            let next = self.next(p);
            let (vp, vn) = (self.nodes[p].vertex, self.nodes[next].vertex);
            if vp != va && vn != va && vp != vb && vn != vb && self.intersects(p, next, a, b) {
                return true;
            }
            p = next;
            if p == a {
                return false;
            }
        }
    }

    fn locally_inside(&self, a: usize, b: usize) -> bool {
        let (prev, next) = (self.prev(a), self.next(a));
        if self.area(prev, a, next) < 0.0 {
            self.area(a, b, next) >= 0.0 && self.area(a, prev, b) >= 0.0
        } else {
            self.area(a, b, prev) < 0.0 || self.area(a, next, b) < 0.0
        }
    }

    /// Even-odd test of the diagonal's midpoint against the ring
    fn middle_inside(&self, a: usize, b: usize) -> bool {
        let ((ax, ay), (bx, by)) = (self.pos(a), self.pos(b));
        let (mx, my) = ((ax + bx) / 2.0, (ay + by) / 2.0);
        let mut inside = false;
        let mut p = a;
        loop {
            let next = self.next(p);
            let ((px, py), (nx, ny)) = (self.pos(p), self.pos(next));
            if (py > my) != (ny > my) && ny != py && mx < (nx - px) * (my - py) / (ny - py) + px {
                inside = !inside;
            }
            p = next;
            if p == a {
                return inside;
            }
        }
    }

    /// Connect `a` and `b` with a bridge, splitting a ring in 2 or merging 2 rings, and return the copy of `b`
    fn split_polygon(&mut self, a: usize, b: usize) -> usize {
        let (ax, ay) = self.pos(a);
        let (bx, by) = self.pos(b);
        let a2 = self.alloc(self.nodes[a].vertex, ax, ay);
        let b2 = self.alloc(self.nodes[b].vertex, bx, by);
        let (an, bp) = (self.next(a), self.prev(b));

        self.nodes[a].next = b;
        self.nodes[b].prev = a;
        self.nodes[a2].next = an;
        self.nodes[an].prev = a2;
        self.nodes[b2].next = a2;
        self.nodes[a2].prev = b2;
        self.nodes[bp].next = b2;
        self.nodes[b2].prev = bp;
        b2
    }
}

fn point_in_triangle(a: (f64, f64), b: (f64, f64), c: (f64, f64), p: (f64, f64)) -> bool {
    let (ap, bp, cp) = ((a.0 - p.0, a.1 - p.1), (b.0 - p.0, b.1 - p.1), (c.0 - p.0, c.1 - p.1));
    cp.0 * ap.1 - ap.0 * cp.1 >= 0.0
        && ap.0 * bp.1 - bp.0 * ap.1 >= 0.0
        && bp.0 * cp.1 - cp.0 * bp.1 >= 0.0
}

/// Positive for a counter-clockwise ring
fn signed_area(ring: &[Vector2]) -> f64 {
    let Some(last) = ring.last() else { return 0.0 };
    let mut prev = *last;
    let mut sum = 0.0;
    for vert in ring {
        sum += (prev.x - vert.x) * (prev.y + vert.y);
        prev = *vert;
    }
    sum
}
