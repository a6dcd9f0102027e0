//! Dense matrices and the network-weights component.

use crate::error::{Result, TrainedDataError};
use crate::serial::{Deserializer, Primitive, Serializable, Serializer};
use std::io::{Read, Write};
use std::ops::{Index, IndexMut};

/// Largest allowed extent of either matrix dimension
pub const MAX_DIM: usize = u16::MAX as usize;

/// Mode bit: weights are int8 with per-row scales
const INT8_FLAG: u8 = 1;
/// Mode bit: the matrix was trained with Adam
const ADAM_FLAG: u8 = 4;
/// Mode bit: floats are stored as f64. Absent in the legacy f32 layout.
const DOUBLE_FLAG: u8 = 128;

/// Row-major 2-D array of fixed-width values.
///
/// Encoded as `u32 dim1 | u32 dim2 | T empty | dim1 * dim2 x T`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array2D<T: Primitive> {
    dim1: usize,
    dim2: usize,
    empty: T,
    data: Vec<T>,
}

impl<T: Primitive> Array2D<T> {
    /// `dim1 x dim2` array filled with `empty`
    pub fn new(dim1: usize, dim2: usize, empty: T) -> Result<Self> {
        check_dims(dim1, dim2)?;
        Ok(Self {
            dim1,
            dim2,
            empty,
            data: vec![empty; dim1 * dim2],
        })
    }

    /// Array from equal-length rows
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let dim2 = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|row| row.len() != dim2) {
            return Err(TrainedDataError::InvalidFormat(format!(
                "Row {} has {} columns, expected {}",
                bad,
                rows[bad].len(),
                dim2
            )));
        }
        check_dims(rows.len(), dim2)?;
        Ok(Self {
            dim1: rows.len(),
            dim2,
            empty: T::default(),
            data: rows.concat(),
        })
    }

    pub fn dim1(&self) -> usize {
        self.dim1
    }

    pub fn dim2(&self) -> usize {
        self.dim2
    }

    pub fn empty_value(&self) -> T {
        self.empty
    }

    pub fn num_elements(&self) -> usize {
        self.data.len()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<T> {
        (i < self.dim1 && j < self.dim2).then(|| self.data[i * self.dim2 + j])
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.dim2..(i + 1) * self.dim2]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.dim1).map(move |i| self.row(i))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Element-wise conversion to another primitive type
    pub fn map<U: Primitive>(&self, f: impl Fn(T) -> U) -> Array2D<U> {
        Array2D {
            dim1: self.dim1,
            dim2: self.dim2,
            empty: f(self.empty),
            data: self.data.iter().copied().map(f).collect(),
        }
    }
}

fn check_dims(dim1: usize, dim2: usize) -> Result<()> {
    for dim in [dim1, dim2] {
        if dim > MAX_DIM {
            return Err(TrainedDataError::InvalidLength {
                what: "matrix dimension",
                len: dim as i64,
            });
        }
    }
    Ok(())
}

impl<T: Primitive> Index<(usize, usize)> for Array2D<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(i < self.dim1 && j < self.dim2, "index ({}, {}) out of range", i, j);
        &self.data[i * self.dim2 + j]
    }
}

impl<T: Primitive> IndexMut<(usize, usize)> for Array2D<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(i < self.dim1 && j < self.dim2, "index ({}, {}) out of range", i, j);
        &mut self.data[i * self.dim2 + j]
    }
}

impl<T: Primitive> Serializable for Array2D<T> {
    fn serialize<W: Write>(&self, out: &mut Serializer<W>) -> Result<()> {
        out.write(self.dim1 as u32)?;
        out.write(self.dim2 as u32)?;
        out.write(self.empty)?;
        out.write_slice(&self.data)
    }

    fn deserialize<R: Read>(input: &mut Deserializer<R>) -> Result<Self> {
        let dim1 = input.read::<u32>()? as usize;
        let dim2 = input.read::<u32>()? as usize;
        check_dims(dim1, dim2)?;
        let empty = input.read()?;
        let data = input.read_slice(dim1 * dim2, "matrix elements")?;
        Ok(Self {
            dim1,
            dim2,
            empty,
            data,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Weights {
    Float(Array2D<f64>),
    Int { wi: Array2D<i8>, scales: Vec<f64> },
}

/// Weight matrix of one network layer, either float or quantized to int8
/// with a multiplicative scale per output row
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    weights: Weights,
    use_adam: bool,
}

impl WeightMatrix {
    pub fn from_float(weights: Array2D<f64>) -> Self {
        Self {
            weights: Weights::Float(weights),
            use_adam: false,
        }
    }

    pub fn is_int_mode(&self) -> bool {
        matches!(self.weights, Weights::Int { .. })
    }

    pub fn use_adam(&self) -> bool {
        self.use_adam
    }

    pub fn set_use_adam(&mut self, use_adam: bool) {
        self.use_adam = use_adam;
    }

    /// Number of outputs (rows)
    pub fn num_outputs(&self) -> usize {
        match &self.weights {
            Weights::Float(wf) => wf.dim1(),
            Weights::Int { wi, .. } => wi.dim1(),
        }
    }

    /// Number of inputs (columns), including the bias column
    pub fn num_inputs(&self) -> usize {
        match &self.weights {
            Weights::Float(wf) => wf.dim2(),
            Weights::Int { wi, .. } => wi.dim2(),
        }
    }

    pub fn float_weights(&self) -> Option<&Array2D<f64>> {
        match &self.weights {
            Weights::Float(wf) => Some(wf),
            Weights::Int { .. } => None,
        }
    }

    pub fn int_weights(&self) -> Option<(&Array2D<i8>, &[f64])> {
        match &self.weights {
            Weights::Float(_) => None,
            Weights::Int { wi, scales } => Some((wi, scales)),
        }
    }

    /// Float view of the weights; int8 values are multiplied back by their
    /// row scale
    pub fn dequantized(&self) -> Array2D<f64> {
        match &self.weights {
            Weights::Float(wf) => wf.clone(),
            Weights::Int { wi, scales } => Array2D {
                dim1: wi.dim1(),
                dim2: wi.dim2(),
                empty: 0.0,
                data: wi
                    .rows()
                    .zip(scales)
                    .flat_map(|(row, &scale)| row.iter().map(move |&w| f64::from(w) * scale))
                    .collect(),
            },
        }
    }

    /// Quantize to int8. Each row is scaled so its largest magnitude maps to
    /// 127, and values are rounded half away from zero. No-op in int mode.
    pub fn convert_to_int(&mut self) {
        let Weights::Float(wf) = &self.weights else {
            return;
        };
        let mut scales = Vec::with_capacity(wf.dim1());
        let mut data = Vec::with_capacity(wf.num_elements());
        for row in wf.rows() {
            let max_abs = row.iter().fold(0.0f64, |max, w| max.max(w.abs()));
            let scale = max_abs / f64::from(i8::MAX);
            scales.push(scale);
            let divisor = if scale == 0.0 { 1.0 } else { scale };
            data.extend(row.iter().map(|w| (w / divisor).round() as i8));
        }
        let wi = Array2D {
            dim1: wf.dim1(),
            dim2: wf.dim2(),
            empty: 0,
            data,
        };
        self.weights = Weights::Int { wi, scales };
    }

    fn mode(&self) -> u8 {
        let mut mode = DOUBLE_FLAG;
        if self.is_int_mode() {
            mode |= INT8_FLAG;
        }
        if self.use_adam {
            mode |= ADAM_FLAG;
        }
        mode
    }

    /// One scale per output row
    fn int_weights_checked(wi: Array2D<i8>, scales: Vec<f64>) -> Result<Weights> {
        if scales.len() != wi.dim1() {
            return Err(TrainedDataError::InvalidFormat(format!(
                "{} weight scales for {} rows",
                scales.len(),
                wi.dim1()
            )));
        }
        Ok(Weights::Int { wi, scales })
    }

    fn deserialize_legacy<R: Read>(input: &mut Deserializer<R>, int_mode: bool) -> Result<Weights> {
        if int_mode {
            let wi = input.read_object()?;
            let scales = input
                .read_vec::<f32>("weight scales")?
                .into_iter()
                .map(f64::from)
                .collect();
            Self::int_weights_checked(wi, scales)
        } else {
            let wf: Array2D<f32> = input.read_object()?;
            Ok(Weights::Float(wf.map(f64::from)))
        }
    }
}

/// `u8 mode`, then the int8 matrix and `f64` scale vector in int mode, or
/// the `f64` matrix otherwise. Inference form only: no training state.
impl Serializable for WeightMatrix {
    fn serialize<W: Write>(&self, out: &mut Serializer<W>) -> Result<()> {
        out.write(self.mode())?;
        match &self.weights {
            Weights::Float(wf) => out.write_object(wf),
            Weights::Int { wi, scales } => {
                out.write_object(wi)?;
                out.write_vec(scales)
            }
        }
    }

    fn deserialize<R: Read>(input: &mut Deserializer<R>) -> Result<Self> {
        let mode: u8 = input.read()?;
        let int_mode = mode & INT8_FLAG != 0;
        let use_adam = mode & ADAM_FLAG != 0;

        let weights = if mode & DOUBLE_FLAG == 0 {
            Self::deserialize_legacy(input, int_mode)?
        } else if int_mode {
            let wi = input.read_object()?;
            let scales = input.read_vec("weight scales")?;
            Self::int_weights_checked(wi, scales)?
        } else {
            Weights::Float(input.read_object()?)
        };

        Ok(Self { weights, use_adam })
    }
}

/// The network-weights component: a network spec string followed by the
/// weight matrices of its layers, in order.
///
/// The layer graph itself belongs to the recognizer; this crate only needs
/// the matrices to compact the component.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkWeights {
    pub spec: String,
    pub layers: Vec<WeightMatrix>,
}

impl NetworkWeights {
    pub fn new(spec: impl Into<String>, layers: Vec<WeightMatrix>) -> Self {
        Self {
            spec: spec.into(),
            layers,
        }
    }

    /// True when every layer is quantized
    pub fn is_int_mode(&self) -> bool {
        self.layers.iter().all(WeightMatrix::is_int_mode)
    }

    pub fn convert_to_int(&mut self) {
        self.layers.iter_mut().for_each(WeightMatrix::convert_to_int);
    }

    /// Total number of weights across all layers
    pub fn num_weights(&self) -> usize {
        self.layers
            .iter()
            .map(|layer| layer.num_outputs() * layer.num_inputs())
            .sum()
    }
}

impl Serializable for NetworkWeights {
    fn serialize<W: Write>(&self, out: &mut Serializer<W>) -> Result<()> {
        out.write_string(&self.spec)?;
        out.write_objects(&self.layers)
    }

    fn deserialize<R: Read>(input: &mut Deserializer<R>) -> Result<Self> {
        let spec = input.read_string("network spec")?;
        let layers = input.read_objects("network layers")?;
        Ok(Self { spec, layers })
    }
}
