#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Name of the field on the record
    pub name: String,

    /// Directory attribute the field maps to. Fields without an attribute are
    /// local to the record and never sent to the directory.
    pub attribute: Option<String>,

    /// How values of this field are encoded on the wire
    pub ty: FieldTy,

    /// True if the field's value forms the entry's RDN
    pub primary_key: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTy {
    /// UTF-8 directory string
    String,

    /// INTEGER syntax, decimal digits on the wire
    Integer,

    /// BOOLEAN syntax, `TRUE` or `FALSE` on the wire
    Boolean,

    /// Raw octets
    Binary,

    /// Multi-valued directory string
    List,
}

impl Field {
    /// A field mapped to the attribute of the same name.
    pub fn new(name: impl Into<String>, ty: FieldTy) -> Field {
        let name = name.into();
        Field {
            attribute: Some(name.clone()),
            name,
            ty,
            primary_key: false,
        }
    }

    /// A field that only lives on the in-memory record.
    pub fn local(name: impl Into<String>, ty: FieldTy) -> Field {
        Field {
            name: name.into(),
            attribute: None,
            ty,
            primary_key: false,
        }
    }

    pub fn attribute(mut self, attribute: impl Into<String>) -> Field {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn primary_key(mut self) -> Field {
        self.primary_key = true;
        self
    }
}
