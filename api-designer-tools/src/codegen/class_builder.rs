use crate::helpers::{to_pascal_case, StringExt};

/// Builds the source of a plain Java class with private attributes and accessor pairs.
pub struct JavaClassBuilder {
    name: String,
    comment: Option<String>,
    attributes: Vec<JavaAttribute>,
}

struct JavaAttribute {
    java_type: String,
    name: String,
    comment: Option<String>,
}

impl JavaClassBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            comment: None,
            attributes: vec![],
        }
    }

    /// A line comment placed above the class declaration.
    pub fn comment(&mut self, comment: &str) -> &mut Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn attribute(&mut self, java_type: &str, name: &str, comment: Option<&str>) -> &mut Self {
        self.attributes.push(JavaAttribute {
            java_type: java_type.to_string(),
            name: name.to_string(),
            comment: comment.filter(|c| !c.is_empty()).map(|c| c.to_string()),
        });
        self
    }

    pub fn build(&self) -> String {
        let mut code = String::new();

        if let Some(comment) = &self.comment {
            code.push_line(0, format!("// {comment}"));
        }

        code.push_line(0, format!("public class {} {{", self.name));

        for attribute in &self.attributes {
            let mut line = format!("private {} {};", attribute.java_type, attribute.name);
            if let Some(comment) = &attribute.comment {
                line.push_str(" // ");
                line.push_str(comment);
            }
            code.push_line(1, line);
        }

        code.push('\n');
        code.push_line(1, "// Getters and Setters");

        for attribute in &self.attributes {
            let method = to_pascal_case(&attribute.name);
            let JavaAttribute { java_type, name, .. } = attribute;

            code.push_line(1, format!("public {java_type} get{method}() {{ return {name}; }}"));
            code.push_line(1, format!("public void set{method}({java_type} {name}) {{ this.{name} = {name}; }}"));
        }

        code.push('}');
        code
    }
}
