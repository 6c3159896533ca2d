//! GraphQL queries sent to the catalogue API.
//!
//! Both queries request five nested levels of `children`. The traversal code
//! does not depend on that depth.

/// Full catalogue query used by the catalogue reindex task.
pub const CATALOGUE_QUERY: &str = r#"
query {
  catalogue(path: "/", language: "en") {
    children {
      ...item
      ...product
      children {
        ...item
        ...product
        children {
          ...item
          ...product
          children {
            ...item
            ...product
            children {
              ...item
              ...product
            }
          }
        }
      }
    }
  }
}

fragment item on Item {
  id
  name
  path
  type
  topics {
    id
    name
    parentId
  }
}

fragment product on Product {
  variants {
    id
    name
    sku
    price
    stock
    isDefault
    attributes {
      attribute
      value
    }
    images {
      key
      url
      variants {
        key
        url
        width
      }
    }
  }
}
"#;

/// Reduced query used by the attributes reindex task.
///
/// Only node types and variant attributes are selected.
pub const ATTRIBUTES_QUERY: &str = r#"
query {
  catalogue(path: "/", language: "en") {
    children {
      ...item
      ...product
      children {
        ...item
        ...product
        children {
          ...item
          ...product
          children {
            ...item
            ...product
            children {
              ...item
              ...product
            }
          }
        }
      }
    }
  }
}

fragment item on Item {
  type
}

fragment product on Product {
  variants {
    attributes {
      attribute
      value
    }
  }
}
"#;
