use std::path::Path;

use super::*;

fn check(rule: &impl Rule, content: &str) -> Vec<Violation> {
    rule.check(Path::new("test.gd"), content)
}

fn line_numbers(violations: &[Violation]) -> Vec<usize> {
    violations.iter().map(|v| v.line_number).collect()
}

// ============================================================================
// LoopStack
// ============================================================================

#[test]
fn loop_stack_closes_scopes_at_same_or_shallower_indent() {
    let mut stack = LoopStack::default();
    stack.open(1);
    stack.open(2);

    stack.close_scopes(3);
    assert_eq!(stack.widths, vec![1, 2]);

    stack.close_scopes(2);
    assert_eq!(stack.widths, vec![1]);

    stack.close_scopes(0);
    assert!(stack.is_empty());
}

#[test]
fn scope_patterns_recognize_declarations_and_loops() {
    let scope = ScopePatterns::new();
    assert_eq!(scope.function_name("func _process(delta):"), Some("_process"));
    assert_eq!(scope.function_name("func  spawn (x):"), Some("spawn"));
    assert_eq!(scope.function_name("var func_ref = 1"), None);
    assert!(scope.is_loop_header("for i in range(10):"));
    assert!(scope.is_loop_header("while running:"));
    assert!(!scope.is_loop_header("format_label()"));
    assert!(!scope.is_loop_header("while_flag = true"));
}

// ============================================================================
// P001 Process in Loop
// ============================================================================

#[test]
fn expensive_call_in_loop_inside_process() {
    let content = "func _process(delta):\n\
                   \tfor enemy in enemies:\n\
                   \t\tvar target = get_node(\"Player\")\n\
                   \t\tenemy.chase(target)\n";

    let violations = check(&ProcessInLoopRule::new(), content);
    assert_eq!(line_numbers(&violations), vec![3]);
    assert_eq!(violations[0].severity, Severity::Warning);
    assert_eq!(violations[0].category, Category::Performance);
    assert!(violations[0].message.contains("_process()"));
}

#[test]
fn expensive_call_after_loop_body_is_not_in_loop() {
    let content = "func _physics_process(delta):\n\
                   \tfor i in 3:\n\
                   \t\tprint(i)\n\
                   \tvar hud = get_tree().root\n";

    assert!(check(&ProcessInLoopRule::new(), content).is_empty());
}

#[test]
fn expensive_call_in_loop_outside_callback_is_fine() {
    let content = "func _ready():\n\
                   \tfor i in 3:\n\
                   \t\tvar n = get_node(\"A\")\n";

    assert!(check(&ProcessInLoopRule::new(), content).is_empty());
}

#[test]
fn callback_ends_at_next_function() {
    let content = "func _process(delta):\n\
                   \tpass\n\
                   func spawn():\n\
                   \tfor i in 3:\n\
                   \t\tvar e = scene.instantiate()\n";

    assert!(check(&ProcessInLoopRule::new(), content).is_empty());
}

#[test]
fn nested_loop_header_with_lookup_is_reported() {
    let content = "func _process(delta):\n\
                   \twhile running:\n\
                   \t\tfor child in get_tree().get_nodes_in_group(\"mobs\"):\n\
                   \t\t\t$Label.text = child.name\n";

    let violations = check(&ProcessInLoopRule::new(), content);
    assert_eq!(line_numbers(&violations), vec![3, 4]);
}

#[test]
fn outermost_loop_header_is_not_inside_a_loop() {
    let content = "func _process(delta):\n\
                   \tfor child in get_tree().get_nodes_in_group(\"mobs\"):\n\
                   \t\tchild.tick(delta)\n";

    assert!(check(&ProcessInLoopRule::new(), content).is_empty());
}

#[test]
fn one_violation_per_line_with_several_patterns() {
    let content = "func _process(delta):\n\
                   \tfor i in 3:\n\
                   \t\tget_node(\"A\").add_child($B.instance())\n";

    assert_eq!(check(&ProcessInLoopRule::new(), content).len(), 1);
}

#[test]
fn blank_and_comment_lines_keep_loop_open() {
    let content = "func _process(delta):\n\
                   \tfor i in 3:\n\
                   \n\
                   # note at column zero\n\
                   \t\tvar n = find_node(\"X\")\n";

    let violations = check(&ProcessInLoopRule::new(), content);
    assert_eq!(line_numbers(&violations), vec![5]);
}

// ============================================================================
// P002 String Concatenation in Loop
// ============================================================================

#[test]
fn concatenation_inside_loop_body() {
    let content = "func build():\n\
                   \tvar s = \"\"\n\
                   \tfor i in 10:\n\
                   \t\ts += \"x\"\n";

    let violations = check(&StringConcatenationInLoopRule::new(), content);
    assert_eq!(line_numbers(&violations), vec![4]);
    assert_eq!(violations[0].rule_id, "P002");
}

#[test]
fn concatenation_at_loop_indent_is_outside_loop() {
    let content = "func build():\n\
                   \tvar s = \"\"\n\
                   \tfor i in 10:\n\
                   \t\tprint(i)\n\
                   \ts += \"x\"\n";

    assert!(check(&StringConcatenationInLoopRule::new(), content).is_empty());
}

#[test]
fn concatenation_before_loop_is_fine() {
    let content = "func build():\n\
                   \tvar s = \"\"\n\
                   \ts += 'x'\n\
                   \tfor i in 10:\n\
                   \t\tprint(i)\n";

    assert!(check(&StringConcatenationInLoopRule::new(), content).is_empty());
}

#[test]
fn numeric_accumulation_is_fine() {
    let content = "func sum():\n\
                   \tfor i in 10:\n\
                   \t\ttotal += i\n";

    assert!(check(&StringConcatenationInLoopRule::new(), content).is_empty());
}

#[test]
fn new_function_resets_loop_stack() {
    let content = "for i in 3:\n\
                   \tpass\n\
                   func other():\n\
                   \ts += \"x\"\n";

    assert!(check(&StringConcatenationInLoopRule::new(), content).is_empty());
}

#[test]
fn concatenation_inside_while_in_any_function() {
    let content = "func _ready():\n\
                   \twhile true:\n\
                   \t\tlog_text += \"line\"\n\
                   \t\tif done:\n\
                   \t\t\tlog_text += \"end\"\n";

    let violations = check(&StringConcatenationInLoopRule::new(), content);
    assert_eq!(line_numbers(&violations), vec![3, 5]);
}

// ============================================================================
// P003 Signal Not Disconnected
// ============================================================================

#[test]
fn connected_signal_without_disconnect() {
    let content = "func _ready():\n\tsignal_obj.connect(\"my_signal\", self, \"_on_signal\")\n";

    let violations = check(&UnusedSignalConnectionRule::new(), content);
    assert_eq!(line_numbers(&violations), vec![2]);
    assert_eq!(violations[0].severity, Severity::Info);
    assert!(violations[0].message.contains("my_signal"));
    assert!(violations[0].message.contains("signal_obj"));
}

#[test]
fn connected_signal_with_matching_disconnect() {
    let content = "func _ready():\n\
                   \tsignal_obj.connect(\"my_signal\", self, \"_on_signal\")\n\
                   \n\
                   func _exit_tree():\n\
                   \tsignal_obj.disconnect(\"my_signal\", self, \"_on_signal\")\n";

    assert!(check(&UnusedSignalConnectionRule::new(), content).is_empty());
}

#[test]
fn disconnect_of_other_pair_does_not_count() {
    let content = "func _ready():\n\
                   \ttimer.connect(\"timeout\", self, \"_tick\")\n\
                   \tbutton.connect(\"pressed\", self, \"_press\")\n\
                   func _exit_tree():\n\
                   \ttimer.disconnect(\"pressed\", self, \"_tick\")\n\
                   \tother.disconnect(\"timeout\", self, \"_tick\")\n";

    let violations = check(&UnusedSignalConnectionRule::new(), content);
    assert_eq!(line_numbers(&violations), vec![2, 3]);
}

#[test]
fn repeated_bind_reported_once_at_first_line() {
    let content = "func a():\n\
                   \t$Hud.health.connect(\"changed\", self, \"_a\")\n\
                   func b():\n\
                   \tHud.health.connect('changed', self, \"_b\")\n\
                   \tHud.health.connect('changed', self, \"_c\")\n";

    let violations = check(&UnusedSignalConnectionRule::new(), content);
    assert_eq!(line_numbers(&violations), vec![2]);
}

#[test]
fn disconnect_before_connect_still_matches() {
    let content = "func _exit_tree():\n\
                   \tnet.disconnect(\"peer\", self, \"_p\")\n\
                   func _ready():\n\
                   \tnet.connect(\"peer\", self, \"_p\")\n";

    assert!(check(&UnusedSignalConnectionRule::new(), content).is_empty());
}

#[test]
fn commented_connect_is_ignored() {
    let content = "# timer.connect(\"timeout\", self, \"_tick\")\n";
    assert!(check(&UnusedSignalConnectionRule::new(), content).is_empty());
}

// ============================================================================
// P004 Get Node in Process
// ============================================================================

#[test]
fn get_node_in_process() {
    let content = "func _process(delta):\n\tvar player = get_node(\"Player\")\n\tplayer.update()\n";

    let violations = check(&GetNodeInProcessRule::new(), content);
    assert_eq!(line_numbers(&violations), vec![2]);
    assert_eq!(violations[0].rule_id, "P004");
    assert_eq!(violations[0].severity, Severity::Warning);
}

#[test]
fn get_node_in_ready_is_fine() {
    let content = "func _ready():\n\tvar player = get_node(\"Player\")\n";
    assert!(check(&GetNodeInProcessRule::new(), content).is_empty());
}

#[test]
fn shorthand_reference_in_physics_process() {
    let content = "func _physics_process(delta):\n\
                   \t$Sprite.rotation += delta\n\
                   \t$\"UI/Score\".text = str(score)\n";

    let violations = check(&GetNodeInProcessRule::new(), content);
    assert_eq!(line_numbers(&violations), vec![2, 3]);
}

#[test]
fn shorthand_on_event_lines_is_ignored() {
    let content = "func _process(delta):\n\
                   \t$EventBus.publish(delta)\n\
                   \ton_event($Body)\n";

    assert!(check(&GetNodeInProcessRule::new(), content).is_empty());
}

#[test]
fn shorthand_on_signal_lines_is_reported() {
    let content = "func _process(delta):\n\
                   \t$SignalLamp.visible = true\n\
                   \t$Door.open()\n\
                   \temit_signal(\"moved\", $Body.position)\n";

    let violations = check(&GetNodeInProcessRule::new(), content);
    assert_eq!(line_numbers(&violations), vec![2, 3, 4]);
}

#[test]
fn unique_name_shorthand_in_process() {
    let content = "func _process(delta):\n\t$%Player.position.x += 1\n";

    let violations = check(&GetNodeInProcessRule::new(), content);
    assert_eq!(line_numbers(&violations), vec![2]);
}

#[test]
fn commented_out_lookup_in_process_is_not_reported() {
    let content = "func _process(delta):\n\
                   \t# var p = get_node(\"Player\")\n\
                   \t# $Sprite.hide()\n";

    assert!(check(&GetNodeInProcessRule::new(), content).is_empty());
}

#[test]
fn get_node_after_process_ends_is_fine() {
    let content = "func _process(delta):\n\
                   \tmove(delta)\n\
                   func setup():\n\
                   \tvar p = get_node(\"P\")\n";

    assert!(check(&GetNodeInProcessRule::new(), content).is_empty());
}

#[test]
fn performance_rules_are_deterministic_and_accept_empty_input() {
    let content = "func _process(d):\n\tfor i in 2:\n\t\t$A.x += \"s\"\n\tn.connect(\"e\", self, \"f\")\n";
    let rules: Vec<Box<dyn Rule>> = vec![
        Box::new(ProcessInLoopRule::new()),
        Box::new(StringConcatenationInLoopRule::new()),
        Box::new(UnusedSignalConnectionRule::new()),
        Box::new(GetNodeInProcessRule::new()),
    ];

    for rule in &rules {
        assert!(rule.check(Path::new("a.gd"), "").is_empty());
        let first = rule.check(Path::new("a.gd"), content);
        let second = rule.check(Path::new("a.gd"), content);
        assert_eq!(first, second);
        assert_eq!(first.len(), 1, "rule {}", rule.id());
    }
}
