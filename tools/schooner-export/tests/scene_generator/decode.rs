//! Test-only readers for the three Schooner 3D layouts.

use schooner_common::{point_pair_count, MeshFlags, MovementFlags, BONE_CURVE_COMPONENTS};

/// Big-endian cursor over a file's bytes
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, n: usize) -> &'a [u8] {
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        bytes
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }

    pub fn u8(&mut self) -> u8 {
        self.take(1)[0]
    }

    pub fn u16(&mut self) -> u16 {
        let b = self.take(2);
        u16::from_be_bytes([b[0], b[1]])
    }

    pub fn i32(&mut self) -> i32 {
        let b = self.take(4);
        i32::from_be_bytes([b[0], b[1], b[2], b[3]])
    }

    pub fn f32(&mut self) -> f32 {
        let b = self.take(4);
        f32::from_be_bytes([b[0], b[1], b[2], b[3]])
    }

    pub fn string(&mut self) -> String {
        let len = self.data[self.pos..]
            .iter()
            .position(|&b| b == 0)
            .expect("unterminated string");
        let s = String::from_utf8(self.take(len).to_vec()).expect("invalid UTF-8");
        self.take(1);
        s
    }

    /// Keyframe count byte followed by its (time, value) pairs
    pub fn curve(&mut self) -> DecodedCurve {
        let count = self.u8();
        self.records(count)
    }

    /// (time, value) pairs of a curve whose count was read beforehand
    pub fn records(&mut self, count: u8) -> DecodedCurve {
        let pairs = (0..point_pair_count(count as usize))
            .map(|_| [self.f32(), self.f32()])
            .collect();
        DecodedCurve { count, pairs }
    }

    /// One shared count byte, then `width` parallel curves
    pub fn channel(&mut self, width: usize) -> Vec<DecodedCurve> {
        let count = self.u8();
        (0..width).map(|_| self.records(count)).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCurve {
    pub count: u8,
    pub pairs: Vec<[f32; 2]>,
}

impl DecodedCurve {
    /// Keyframe points (every third pair, starting at the first)
    pub fn points(&self) -> Vec<[f32; 2]> {
        self.pairs.iter().step_by(3).copied().collect()
    }
}

#[derive(Debug)]
pub struct DecodedMesh {
    pub version: i32,
    pub flags: MeshFlags,
    pub face_count: u16,
    pub vertex_count: u16,
    pub indices: Vec<u16>,
    pub positions: Vec<f32>,
    pub sharp_vertices: Vec<u16>,
    pub uvs: Vec<f32>,
    pub weights: Vec<Vec<(u8, f32)>>,
}

pub fn mesh(data: &[u8]) -> DecodedMesh {
    let mut r = Reader::new(data);
    let version = r.i32();
    let flags = MeshFlags::from_byte(r.u8());
    let face_count = r.u16();
    let vertex_count = r.u16();

    let index_count = face_count as usize * flags.indices_per_face();
    let indices = (0..index_count).map(|_| r.u16()).collect();
    let positions = (0..vertex_count as usize * 3).map(|_| r.f32()).collect();

    let mut sharp_vertices = Vec::new();
    let mut uvs = Vec::new();
    if flags.textured {
        let sharp_count = r.u16();
        sharp_vertices = (0..sharp_count).map(|_| r.u16()).collect();
        uvs = (0..vertex_count as usize * 2).map(|_| r.f32()).collect();
    }

    let mut weights = Vec::new();
    if flags.skinned {
        for _ in 0..vertex_count {
            let count = r.u8();
            weights.push((0..count).map(|_| (r.u8(), r.f32())).collect());
        }
    }

    assert!(r.is_empty(), "trailing bytes after mesh data");
    DecodedMesh {
        version,
        flags,
        face_count,
        vertex_count,
        indices,
        positions,
        sharp_vertices,
        uvs,
        weights,
    }
}

#[derive(Debug)]
pub struct DecodedAction {
    pub name: String,
    pub flags: MovementFlags,
    /// Movement component curves in channel order
    pub curves: Vec<DecodedCurve>,
    /// Four quaternion curves per bone (armature files only)
    pub bones: Vec<Vec<DecodedCurve>>,
}

fn action(r: &mut Reader<'_>, bone_count: usize) -> DecodedAction {
    let name = r.string();
    let flags = MovementFlags::from_byte(r.u8());
    let curves = flags
        .channel_widths()
        .flat_map(|width| r.channel(width))
        .collect();
    let bones = (0..bone_count)
        .map(|_| (0..BONE_CURVE_COMPONENTS).map(|_| r.curve()).collect())
        .collect();
    DecodedAction {
        name,
        flags,
        curves,
        bones,
    }
}

/// Returns the version and the actions of a movements file
pub fn movements(data: &[u8]) -> (i32, Vec<DecodedAction>) {
    let mut r = Reader::new(data);
    let version = r.i32();
    let mut actions = Vec::new();
    while !r.is_empty() {
        actions.push(action(&mut r, 0));
    }
    (version, actions)
}

#[derive(Debug)]
pub struct DecodedArmature {
    pub version: i32,
    /// (head, parent index + 1)
    pub bones: Vec<([f32; 3], u8)>,
    pub actions: Vec<DecodedAction>,
}

pub fn armature(data: &[u8]) -> DecodedArmature {
    let mut r = Reader::new(data);
    let version = r.i32();
    let bone_count = r.u8() as usize + 1;
    let bones: Vec<([f32; 3], u8)> = (0..bone_count)
        .map(|_| ([r.f32(), r.f32(), r.f32()], r.u8()))
        .collect();

    let mut actions = Vec::new();
    while !r.is_empty() {
        actions.push(action(&mut r, bone_count));
    }
    DecodedArmature {
        version,
        bones,
        actions,
    }
}
