use crate::helpers::{strip_whitespace, StringExt};
use crate::models::{ApiInterface, HttpMethod};

fn mapping_annotation(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "GetMapping",
        HttpMethod::Post => "PostMapping",
        HttpMethod::Put => "PutMapping",
        HttpMethod::Delete => "DeleteMapping",
    }
}

/// Generates a Spring style controller with a single handler for the interface.
///
/// GET handlers take the id from the path, everything else takes the request class as body.
/// The handler body is a fixed skeleton, no business logic is generated.
pub(super) fn generate_controller(interface: &ApiInterface, base_name: &str) -> String {
    let response_class = format!("{base_name}Response");
    let handler_name = strip_whitespace(&interface.name).to_lowercase();

    let (parameter, argument) = match interface.method {
        HttpMethod::Get => ("@PathVariable Long id".to_string(), "id"),
        _ => (format!("@RequestBody {base_name}Request request"), "request"),
    };

    let mut code = String::new();
    code.push_line(0, "// Spring Boot Controller");
    code.push_line(0, "@RestController");
    code.push_line(0, "@RequestMapping(\"/api\")");
    code.push_line(0, format!("public class {base_name}Controller {{"));
    code.push('\n');
    code.push_line(1, format!("@{}(\"{}\")", mapping_annotation(interface.method), interface.path));
    code.push_line(1, format!("public ResponseEntity<{response_class}> {handler_name}("));
    code.push_line(2, parameter);
    code.push_line(1, ") {");
    code.push_line(2, "try {");
    code.push_line(3, format!("{response_class} response = processRequest({argument});"));
    code.push('\n');
    code.push_line(3, "return ResponseEntity.ok(response);");
    code.push_line(2, "} catch (Exception e) {");
    code.push_line(3, "return ResponseEntity.status(HttpStatus.INTERNAL_SERVER_ERROR)");
    code.push_line(4, ".body(new ErrorResponse(false, e.getMessage()));");
    code.push_line(2, "}");
    code.push_line(1, "}");
    code.push('}');
    code
}
