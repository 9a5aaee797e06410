use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(Arc<String>),
    Boolean(bool),
    Binary(Arc<Vec<u8>>),
    Struct(Arc<dyn Row>),
    Array(Arc<Vec<Value>>),
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "'{v}'"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Binary(v) => write_list(f, v.iter()),
            Value::Struct(v) => write!(f, "{v}"),
            Value::Array(v) => write_list(f, v.iter()),
        }
    }
}

fn write_list<T: Display>(f: &mut Formatter<'_>, items: impl Iterator<Item = T>) -> std::fmt::Result {
    write!(f, "[")?;
    for (i, x) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{x}")?;
    }
    write!(f, "]")
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Arc::new(s.into()))
    }

    pub fn int(i: i32) -> Self {
        Value::Int(i)
    }

    pub fn long(l: i64) -> Self {
        Value::Long(l)
    }

    pub fn float(f: f32) -> Self {
        Value::Float(f)
    }

    pub fn double(d: f64) -> Self {
        Value::Double(d)
    }

    pub fn boolean(b: bool) -> Self {
        Value::Boolean(b)
    }

    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Binary(Arc::new(bytes.into()))
    }

    pub fn row(values: Vec<Value>) -> Self {
        Value::Struct(Arc::new(GenericRow::new(values)))
    }

    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(Arc::new(values))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Variant name used in mismatch messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Binary(_) => "binary",
            Value::Struct(_) => "struct",
            Value::Array(_) => "array",
        }
    }

    pub fn get_struct(&self) -> Option<&Arc<dyn Row>> {
        if let Value::Struct(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Int(v1), Int(v2)) => v1.eq(v2),
            (Long(v1), Long(v2)) => v1.eq(v2),
            (Float(v1), Float(v2)) => v1.eq(v2),
            (Double(v1), Double(v2)) => v1.eq(v2),
            (String(v1), String(v2)) => v1.eq(v2),
            (Boolean(v1), Boolean(v2)) => v1.eq(v2),
            (Binary(v1), Binary(v2)) => v1.eq(v2),
            (Struct(v1), Struct(v2)) => v1.as_ref().eq(v2.as_ref()),
            (Array(v1), Array(v2)) => v1.eq(v2),
            (Null, Null) => true,
            _ => false,
        }
    }
}

pub trait Row: Debug + Display + Send + Sync {
    fn len(&self) -> usize;
    fn is_null(&self, i: usize) -> bool;
    fn get(&self, i: usize) -> &Value;
    fn update(&mut self, i: usize, value: Value);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PartialEq for dyn Row {
    fn eq(&self, other: &Self) -> bool {
        let len = self.len();
        if len != other.len() {
            return false;
        }
        (0..len).all(|i| self.get(i) == other.get(i))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenericRow {
    values: Vec<Value>,
}

impl GenericRow {
    pub fn new(values: Vec<Value>) -> GenericRow {
        GenericRow { values }
    }

    pub fn new_with_size(size: usize) -> GenericRow {
        GenericRow { values: vec![Value::Null; size] }
    }
}

impl Display for GenericRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_list(f, self.values.iter())
    }
}

impl Row for GenericRow {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn is_null(&self, i: usize) -> bool {
        self.values[i].is_null()
    }

    fn get(&self, i: usize) -> &Value {
        &self.values[i]
    }

    fn update(&mut self, i: usize, value: Value) {
        self.values[i] = value;
    }
}
