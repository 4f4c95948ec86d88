use crate::arguments::Arguments;
use crate::error::Result;
use crate::graph::{Graph, NodeId, TopologicalOrder};
use crate::logger::Logger;
use crate::matrix::{read_matrix, Tokens};
use serde_json::{json, Value};
use std::io::{BufRead, Write};

/// One console run: read the matrix, show the graph, sort it, report.
pub struct Session {
    arguments: Arguments,
    action_logger: Logger,
}

impl Session {
    pub fn new(arguments: Arguments, action_logger: Logger) -> Self {
        Session {
            arguments,
            action_logger,
        }
    }

    pub fn run<R: BufRead, W: Write>(&self, input: R, out: &mut W) -> Result<()> {
        let result = self.execute(input, out);
        if let Err(e) = &result {
            self.action_logger.error(&e.to_string());
        }
        result
    }

    fn execute<R: BufRead, W: Write>(&self, input: R, out: &mut W) -> Result<()> {
        let mut tokens = Tokens::new(input);
        let matrix = read_matrix(&mut tokens, out, self.arguments.entry_policy())?;
        self.action_logger
            .info(&format!("Read connectivity matrix for {} nodes", matrix.size()));

        let mut graph = Graph::from_matrix(&matrix);
        self.action_logger.info(&format!(
            "Built graph with {} nodes and {} edges",
            graph.len(),
            graph.edge_count()
        ));

        writeln!(out, "\nGraph structure:")?;
        graph.write_structure(out)?;

        let order = graph.topological_sort()?;
        self.action_logger
            .info(&format!("Topological sort ordered {} nodes", order.len()));

        writeln!(out, "\nTopological Sort Order:")?;
        for (position, id) in order.iter() {
            writeln!(out, "Node {} (TopNum = {})", id, position)?;
        }

        if self.arguments.all_orders > 0 {
            self.write_all_orders(&graph, out)?;
        }

        if self.arguments.json {
            writeln!(out, "{}", summary(&graph, &order))?;
        }

        out.flush()?;
        Ok(())
    }

    fn write_all_orders<W: Write>(&self, graph: &Graph, out: &mut W) -> Result<()> {
        let limit = self.arguments.all_orders;
        // one extra order tells whether the listing was cut short
        let mut orders = graph.all_topological_orders(limit.saturating_add(1));

        if orders.len() > limit {
            orders.truncate(limit);
            self.action_logger.warning(&format!(
                "Stopped at the limit of {} topological orders, more exist",
                limit
            ));
        }
        self.action_logger
            .debug(&format!("Listing {} topological orders", orders.len()));

        writeln!(out, "\nAll topological orders (up to {}):", limit)?;
        for order in &orders {
            writeln!(out, "{}", join(order))?;
        }
        Ok(())
    }
}

fn join(ids: &[NodeId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn summary(graph: &Graph, order: &TopologicalOrder) -> Value {
    let edges: Vec<Value> = graph
        .edges()
        .map(|(from, to)| json!([from.index(), to.index()]))
        .collect();
    let order: Vec<Value> = order
        .iter()
        .map(|(position, id)| json!({ "node": id.index(), "top_num": position }))
        .collect();

    json!({
        "nodes": graph.len(),
        "edges": edges,
        "order": order,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, GraphError, InputError, ValidationError};
    use crate::logger::tests::temp_log_path;
    use crate::logger::LogLevel;
    use clap::Parser;
    use std::fs;
    use std::io::Cursor;

    const PROMPTS_4: &str = "Enter number of nodes: \
        Enter the connectivity matrix (each row of 4 values, 1 for edge, 0 for no edge):\n\
        Row 0: Row 1: Row 2: Row 3: ";

    fn session(args: &[&str], tag: &str) -> (Session, std::path::PathBuf) {
        let path = temp_log_path(tag);
        let mut argv = vec!["topsort-runner"];
        argv.extend_from_slice(args);
        let arguments = Arguments::try_parse_from(argv).unwrap();
        let logger = Logger::new(path.to_string_lossy().into_owned(), LogLevel::DEBUG);
        (Session::new(arguments, logger), path)
    }

    fn run(args: &[&str], input: &str, tag: &str) -> (Result<()>, String, String) {
        let (session, path) = session(args, tag);
        let mut out = vec![];
        let result = session.run(Cursor::new(input.to_string()), &mut out);
        let log = fs::read_to_string(&path).unwrap_or_default();
        let _ = fs::remove_file(&path);
        (result, String::from_utf8(out).unwrap(), log)
    }

    const DIAMOND: &str = "4\n0 1 1 0\n0 0 0 1\n0 0 0 1\n0 0 0 0\n";

    #[test]
    fn full_report() {
        let (result, out, log) = run(&[], DIAMOND, "report");
        result.unwrap();

        let expected = format!(
            "{}\n\
             Graph structure:\n\
             Node 0 connects to: 1 2\n\
             Node 1 connects to: 3\n\
             Node 2 connects to: 3\n\
             Node 3 connects to:\n\
             \n\
             Topological Sort Order:\n\
             Node 0 (TopNum = 0)\n\
             Node 1 (TopNum = 1)\n\
             Node 2 (TopNum = 2)\n\
             Node 3 (TopNum = 3)\n",
            PROMPTS_4
        );
        assert_eq!(out, expected);
        assert!(log.contains("Built graph with 4 nodes and 4 edges"));
        assert!(log.contains("Topological sort ordered 4 nodes"));
    }

    #[test]
    fn order_lines_follow_positions() {
        let input = "3\n0 0 0\n1 0 0\n1 1 0\n";
        let (result, out, _) = run(&[], input, "positions");
        result.unwrap();
        assert!(out.ends_with(
            "Topological Sort Order:\n\
             Node 2 (TopNum = 0)\n\
             Node 1 (TopNum = 1)\n\
             Node 0 (TopNum = 2)\n"
        ));
    }

    #[test]
    fn cycle_stops_before_order() {
        let input = "3\n0 1 0\n0 0 1\n1 0 0\n";
        let (result, out, log) = run(&[], input, "cycle");

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            Error::Graph(GraphError::CycleDetected { ref unordered })
                if unordered == &vec![NodeId(0), NodeId(1), NodeId(2)]
        ));
        assert_eq!(err.exit_code(), 3);
        assert!(out.contains("Graph structure:"));
        assert!(!out.contains("Topological Sort Order:"));
        assert!(log.contains("ERROR cycle detected: nodes 0, 1, 2 could not be ordered"));
    }

    #[test]
    fn malformed_input_fails_before_report() {
        let (result, out, _) = run(&[], "2\n0 1\nzero 0\n", "malformed");
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Input(InputError::NotAnInteger { .. })));
        assert_eq!(err.exit_code(), 1);
        assert!(!out.contains("Graph structure:"));
    }

    #[test]
    fn strict_and_lenient_values() {
        let input = "2\n0 5\n0 0\n";

        let (result, _, _) = run(&[], input, "strict");
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidEntry { value: 5, .. })
        ));
        assert_eq!(err.exit_code(), 2);

        let (result, out, _) = run(&["--lenient"], input, "lenient");
        result.unwrap();
        assert!(out.contains("Node 0 connects to: 1\n"));
    }

    #[test]
    fn empty_graph_prints_headers_only() {
        let (result, out, _) = run(&[], "0\n", "empty");
        result.unwrap();
        assert!(out.ends_with("\nGraph structure:\n\nTopological Sort Order:\n"));
    }

    #[test]
    fn all_orders_listing() {
        let (result, out, log) = run(&["--all-orders", "1"], DIAMOND, "all_orders_cut");
        result.unwrap();
        assert!(out.ends_with("\nAll topological orders (up to 1):\n0 1 2 3\n"));
        assert!(log.contains("DEBUG Listing 1 topological orders"));
        assert!(log.contains("WARNING Stopped at the limit of 1"));

        let (result, out, log) = run(&["--all-orders", "10"], DIAMOND, "all_orders");
        result.unwrap();
        assert!(out.ends_with("(up to 10):\n0 1 2 3\n0 2 1 3\n"));
        assert!(!log.contains("WARNING"));
    }

    #[test]
    fn exact_number_of_orders_is_not_cut_short() {
        let (result, out, log) = run(&["--all-orders", "2"], DIAMOND, "all_orders_exact");
        result.unwrap();
        assert!(out.ends_with("(up to 2):\n0 1 2 3\n0 2 1 3\n"));
        assert!(log.contains("DEBUG Listing 2 topological orders"));
        assert!(!log.contains("WARNING"));
    }

    #[test]
    fn json_summary() {
        let (result, out, _) = run(&["--json"], DIAMOND, "json");
        result.unwrap();

        let last = out.lines().last().unwrap();
        let value: Value = serde_json::from_str(last).unwrap();
        assert_eq!(value["nodes"], 4);
        assert_eq!(value["edges"], json!([[0, 1], [0, 2], [1, 3], [2, 3]]));
        assert_eq!(value["order"][3], json!({ "node": 3, "top_num": 3 }));
    }
}
