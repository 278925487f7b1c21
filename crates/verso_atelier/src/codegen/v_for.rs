//! v-for emission.

use verso_carton::go_quote;

use crate::ast::VFor;

/// Wrap `body` in an immediately-invoked iteration closure.
///
/// The collection is resolved against the current scope by the runtime's
/// `lookInterfaceToSlice` helper (the array key is a dotted lookup path, not
/// a transpiled expression), and each iteration rebinds the scope identifier
/// to an extended map carrying the index and item bindings.
pub fn generate_for(v_for: &VFor, body: &str, scope: &str) -> String {
    format!(
        r#"func ()string{{
  var c = ""

  for index, item := range lookInterfaceToSlice({scope}, {array_key}) {{
    c += func(xdata map[string]interface{{}}) string{{
        {scope} := extendMap(map[string]interface{{}}{{
          {index_key}: index,
          {item_key}: item,
        }}, xdata)

        return {body}
    }}({scope})
  }}
return c
}}()"#,
        array_key = go_quote(&v_for.array_key),
        index_key = go_quote(&v_for.index_key),
        item_key = go_quote(&v_for.item_key),
    )
}
